//! Tests for confirmation answers

#[cfg(test)]
mod tests {
    use shrinkfit::io::confirm::{AssumeYes, Confirm, read_answer};
    use std::io::Cursor;

    // Tests affirmative answers in any case
    // Verified by accepting only lowercase "y"
    #[test]
    fn test_yes_answers() {
        for answer in ["y\n", "Y\n", "yes\n", " YES \r\n"] {
            assert!(read_answer(&mut Cursor::new(answer)).unwrap(), "{answer:?}");
        }
    }

    // Tests everything else, including end of input, means no
    // Verified by defaulting to yes on empty input
    #[test]
    fn test_other_answers_decline() {
        for answer in ["", "\n", "n\n", "no\n", "yep\n"] {
            assert!(!read_answer(&mut Cursor::new(answer)).unwrap(), "{answer:?}");
        }
    }

    // Tests --yes never blocks
    // Verified by returning false from AssumeYes
    #[test]
    fn test_assume_yes() {
        assert!(AssumeYes.confirm("Proceed?").unwrap());
    }
}
