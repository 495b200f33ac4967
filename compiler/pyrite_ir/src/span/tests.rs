use super::*;

#[test]
fn merge_covers_both() {
    let a = Span::new(2, 5);
    let b = Span::new(8, 11);
    assert_eq!(a.merge(b), Span::new(2, 11));
    assert_eq!(b.merge(a), Span::new(2, 11));
}

#[test]
fn len_and_empty() {
    assert_eq!(Span::new(3, 7).len(), 4);
    assert!(Span::DUMMY.is_empty());
    assert!(!Span::new(0, 1).is_empty());
}

#[test]
fn try_from_range_rejects_huge_offsets() {
    assert_eq!(Span::try_from_range(1..4), Ok(Span::new(1, 4)));

    let huge = u32::MAX as usize + 1;
    assert_eq!(
        Span::try_from_range(huge..huge),
        Err(SpanError::StartTooLarge(huge))
    );
    assert_eq!(Span::try_from_range(0..huge), Err(SpanError::EndTooLarge(huge)));
}

#[test]
fn display_is_byte_range() {
    assert_eq!(Span::new(4, 9).to_string(), "4..9");
}
