use numbers_calc::config::{Config, ConfigError};
use numbers_calc::render::{color_groups, format_number, format_result, render_rows, sum_highlights, HighlightPart};
use numbers_calc::{evaluate_all_lines, LineResult};
use pretty_assertions::assert_eq;
use std::io::Write;

#[cfg(test)]
mod render_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.5, 6), "2.5");
        assert_eq!(format_number(100.0, 2), "100");
        assert_eq!(format_number(1.0 / 3.0, 3), "0.333");
        assert_eq!(format_number(-0.0000001, 3), "0");
        assert_eq!(format_number(-12.76, 1), "-12.8");
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(Some(&LineResult::Number(4.0)), 6), "4");
        assert_eq!(
            format_result(Some(&LineResult::Error("line 9 is out of bounds".into())), 6),
            "line 9 is out of bounds"
        );
        assert_eq!(format_result(None, 6), "");
    }

    #[test]
    fn test_color_groups() {
        let lines = ["// a", "// b", "1", "[Expr Start]", "2", "[Expr End]", "3", "// c"];
        assert_eq!(color_groups(&lines), vec![0, 0, 1, 2, 2, 2, 3, 4]);
    }

    #[test]
    fn test_color_groups_unterminated_block() {
        let lines = ["1", "[Expr Start]", "2", "// inside"];
        assert_eq!(color_groups(&lines), vec![0, 1, 1, 1]);
    }

    #[test]
    fn test_sum_highlights() {
        assert_eq!(
            sum_highlights("sum(1, 3-4) + sum(2) // note"),
            vec![
                HighlightPart {
                    text: "1".into(),
                    lines: vec![0]
                },
                HighlightPart {
                    text: "3-4".into(),
                    lines: vec![2, 3]
                },
                HighlightPart {
                    text: "2".into(),
                    lines: vec![1]
                },
            ]
        );
        assert_eq!(
            sum_highlights("sum(4-2, 0)"),
            vec![
                HighlightPart {
                    text: "4-2".into(),
                    lines: vec![]
                },
                HighlightPart {
                    text: "0".into(),
                    lines: vec![]
                },
            ]
        );
        assert!(sum_highlights("// sum(1)").is_empty());
        assert!(sum_highlights("1 + 2").is_empty());
    }

    #[test]
    fn test_render_rows() {
        let rows = evaluate_all_lines(&["x = 2", "// note", "x / 0"]);
        let text = render_rows(&rows, 6);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1   x = 2   | 2");
        assert_eq!(lines[1], "2   // note | ");
        assert_eq!(
            lines[2],
            "3 ! x / 0   | invalid expression: result is not a finite number"
        );
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::from_json("{}").expect("empty object is valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.precision, 6);
        assert!(!config.json);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{ "precision": 2, "logFile": "/tmp/numbers.log", "json": true }}"#
        )
        .expect("write config");

        let config = Config::load(file.path()).expect("valid config");
        assert_eq!(config.precision, 2);
        assert_eq!(
            config.log_file.as_deref(),
            Some(std::path::Path::new("/tmp/numbers.log"))
        );
        assert!(config.json);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            Config::from_json(r#"{ "precision": 40 }"#),
            Err(ConfigError::Precision(40))
        ));

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write config");
        match Config::load(file.path()) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {other:?}"),
        }

        let missing = file.path().with_extension("missing");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));
    }
}
