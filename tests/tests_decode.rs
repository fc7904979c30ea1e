#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use daystamp::layout::MILLIS_IN_DAY;
    use daystamp::{decode, extract_id, IdGenError, Layout};

    #[test]
    fn test_extract_reference_vector() {
        let (machine_id, elapsed) = extract_id(22091819345162233);
        assert_eq!(machine_id, 288);
        assert_eq!(elapsed, 17809401);
    }

    #[test]
    fn test_extract_elapsed_always_in_day_range() {
        for id in [22091819345162233u64, 23010136000000, 9_999_999_999_999_999_999, 1_234_567] {
            let (_, elapsed) = extract_id(id);
            assert!(elapsed < MILLIS_IN_DAY);
        }
    }

    #[test]
    fn test_extract_malformed_does_not_panic() {
        assert_eq!(extract_id(7), (0, 0));
        assert_eq!(extract_id(999999), (0, 0));
    }

    #[test]
    fn test_decode_matches_extract() {
        let id = 22091819345162233;
        let decoded = decode(id, Layout::LEGACY).unwrap();
        assert_eq!(decoded.date, NaiveDate::from_ymd_opt(2022, 9, 18).unwrap());
        assert_eq!(
            extract_id(id),
            (u64::from(decoded.machine_id), decoded.elapsed_ms)
        );
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(decode(7, Layout::LEGACY), Err(IdGenError::MalformedId(7)));
    }
}
