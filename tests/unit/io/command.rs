//! Tests for operator command decoding

#[cfg(test)]
mod tests {
    use circuit_trainer::CircuitError;
    use circuit_trainer::algorithm::feedback::Verdict;
    use circuit_trainer::io::command::{Command, HELP};

    fn parse(line: &str) -> Option<Command> {
        Command::parse(line).expect("line should parse")
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   \t"), None);
        assert_eq!(parse("# a note"), None);
    }

    #[test]
    fn test_add_keeps_raw_arguments() {
        assert_eq!(
            parse("add 3 -4 Resistor"),
            Some(Command::Add {
                row: 3,
                col: -4,
                kind: "Resistor".to_string(),
            })
        );
        assert_eq!(
            parse("  PLACE 0 0 *  "),
            Some(Command::Add {
                row: 0,
                col: 0,
                kind: "*".to_string(),
            })
        );
    }

    #[test]
    fn test_keywords_and_aliases() {
        let cases = [
            ("generate", Command::Generate),
            ("gen", Command::Generate),
            ("rm 1 2", Command::Remove { row: 1, col: 2 }),
            ("test", Command::Test),
            ("accept", Command::Feedback(Verdict::Accepted)),
            ("feedback no", Command::Feedback(Verdict::Rejected)),
            ("feedback 1", Command::Feedback(Verdict::Accepted)),
            ("fix", Command::Correct),
            ("show", Command::Print),
            ("reset", Command::Clear),
            ("status", Command::Status),
            ("types", Command::Legend),
            ("?", Command::Help),
            ("exit", Command::Quit),
        ];

        for (line, expected) in cases {
            assert_eq!(parse(line), Some(expected), "line '{line}'");
        }
    }

    #[test]
    fn test_unknown_keyword() {
        assert!(matches!(
            Command::parse("teleport 1 2"),
            Err(CircuitError::UnrecognizedCommand { ref command }) if command == "teleport"
        ));
    }

    #[test]
    fn test_missing_and_malformed_arguments() {
        assert!(matches!(
            Command::parse("add 1 2"),
            Err(CircuitError::MissingArgument {
                command: "add",
                argument: "type"
            })
        ));
        assert!(matches!(
            Command::parse("remove 1"),
            Err(CircuitError::MissingArgument {
                command: "remove",
                argument: "col"
            })
        ));
        assert!(matches!(
            Command::parse("add x 2 wire"),
            Err(CircuitError::InvalidArgument {
                command: "add",
                argument: "row",
                ..
            })
        ));
        assert!(matches!(
            Command::parse("feedback maybe"),
            Err(CircuitError::InvalidArgument {
                argument: "verdict",
                ..
            })
        ));
        assert!(matches!(
            Command::parse("feedback"),
            Err(CircuitError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        assert!(matches!(
            Command::parse("test now"),
            Err(CircuitError::InvalidArgument {
                command: "test",
                argument: "arguments",
                ..
            })
        ));
    }

    #[test]
    fn test_help_lists_every_keyword() {
        let commands = [
            Command::Generate,
            Command::Test,
            Command::Correct,
            Command::Print,
            Command::Clear,
            Command::Status,
            Command::Legend,
            Command::Help,
            Command::Quit,
            Command::Remove { row: 0, col: 0 },
            Command::Feedback(Verdict::Accepted),
        ];
        for command in commands {
            assert!(HELP.contains(command.keyword()), "{}", command.keyword());
        }
    }
}
