// tests/interactive_simulation.rs
// Simulates editing sessions: every edit re-evaluates the whole buffer

use numbers_calc::session::{parse_command, run_repl, Command, CommandError, EditError, Notepad};
use numbers_calc::{evaluate_all_lines, Row};
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn values(rows: &[Row]) -> Vec<Option<f64>> {
    rows.iter().map(Row::number).collect()
}

#[cfg(test)]
mod notepad_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rename_variable_while_typing() {
        let mut notepad = Notepad::from_text("x = 5\nx + 1");
        assert_eq!(values(notepad.rows()), vec![Some(5.0), Some(6.0)]);

        let rows = notepad.set_line(0, "y = 5").expect("line exists");
        assert!(rows[1].is_invalid);
        assert_eq!(notepad.context().get("x"), None);
        assert_eq!(notepad.context().get("y"), Some(5.0));
    }

    #[test]
    fn test_insert_and_remove_lines() {
        let mut notepad = Notepad::from_text("1\n2\nsum");
        assert_eq!(values(notepad.rows()), vec![Some(1.0), Some(2.0), Some(3.0)]);

        notepad.remove_line(0).expect("line exists");
        assert_eq!(values(notepad.rows()), vec![Some(2.0), Some(2.0)]);

        notepad.insert_line(0, "10").expect("index in range");
        assert_eq!(values(notepad.rows()), vec![Some(10.0), Some(2.0), Some(12.0)]);

        notepad.insert_line(3, "sum(1-2)").expect("append position");
        assert_eq!(notepad.rows()[3].number(), Some(12.0));
        assert_eq!(notepad.text(), "10\n2\nsum\nsum(1-2)");
    }

    #[test]
    fn test_edits_out_of_range() {
        let mut notepad = Notepad::from_text("1\n2\n3");
        assert_eq!(
            notepad.set_line(5, "4").unwrap_err(),
            EditError::OutOfRange { line: 6, len: 3 }
        );
        assert!(notepad.remove_line(3).is_err());
        assert!(notepad.insert_line(4, "x").is_err());
        assert_eq!(notepad.lines().len(), 3);
    }

    #[test]
    fn test_wrap_expression_in_block() {
        let mut notepad = Notepad::from_text("2 + 3");
        let rows = notepad.wrap_in_block(0).expect("line exists");

        assert_eq!(values(rows), vec![None, None, None, Some(5.0)]);
        assert_eq!(
            notepad.lines(),
            &["[Expr Start]", "2 + 3", "", "[Expr End]"]
        );

        notepad.set_line(2, "* 4").expect("line exists");
        assert_eq!(notepad.rows()[3].number(), Some(14.0));
    }

    #[test]
    fn test_wrap_comment_adds_comment_line() {
        let mut notepad = Notepad::from_text("// groceries\n4");
        notepad.wrap_in_block(0).expect("line exists");
        assert_eq!(notepad.lines(), &["// groceries", "// ", "4"]);
    }

    #[test]
    fn test_edits_never_expose_values_from_below() {
        let mut notepad = Notepad::from_text("y = x\nx = 3");
        assert!(notepad.rows()[0].is_invalid);

        notepad.push_line("");
        assert!(notepad.rows()[0].is_invalid);

        notepad.set_line(1, "x = 7").expect("line exists");
        assert!(notepad.rows()[0].is_invalid);
        assert_eq!(notepad.rows()[1].number(), Some(7.0));
        assert_eq!(notepad.rows(), evaluate_all_lines(notepad.lines()).as_slice());
    }

    #[test]
    fn test_paste_and_clear() {
        let mut notepad = Notepad::new();
        assert!(notepad.rows().is_empty());

        notepad.set_text("1\r\n2\r\nsum");
        assert_eq!(notepad.lines(), &["1", "2", "sum"]);
        assert_eq!(notepad.rows()[2].number(), Some(3.0));

        assert!(notepad.clear().is_empty());
        assert!(notepad.context().is_empty());
    }
}

#[cfg(test)]
mod command_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command(r#"set 2 "x = 5""#),
            Ok(Command::Set {
                line: 2,
                text: "x = 5".to_string()
            })
        );
        assert_eq!(
            parse_command("append x + 1"),
            Ok(Command::Append("x + 1".to_string()))
        );
        assert_eq!(
            parse_command("insert 1 // header"),
            Ok(Command::Insert {
                line: 1,
                text: "// header".to_string()
            })
        );
        assert_eq!(parse_command("WRAP 3"), Ok(Command::Wrap(3)));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_command_errors() {
        assert_eq!(
            parse_command("delete 0"),
            Err(CommandError::InvalidLine("0".to_string()))
        );
        assert_eq!(parse_command("wrap"), Err(CommandError::MissingLine("wrap")));
        assert_eq!(
            parse_command("frob 1"),
            Err(CommandError::Unknown("frob".to_string()))
        );
        assert_eq!(parse_command(r#"append "1 + 2"#), Err(CommandError::Quotes));
    }
}

#[cfg(test)]
mod repl_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(script: &str) -> String {
        let mut notepad = Notepad::new();
        let mut out = Vec::new();
        run_repl(&mut notepad, Cursor::new(script), &mut out, 6).expect("in-memory io");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn test_session_flow() {
        let out = run("append x = 4\nappend x * 2\nvars\nset 1 y = 1\nquit\nappend 99\n");

        assert!(out.contains("| 8"));
        assert!(out.contains("x = 4 (line 1)"));
        assert!(out.contains("undefined variable `x`"));
        assert!(!out.contains("99"));
    }

    #[test]
    fn test_session_reports_errors_and_continues() {
        let out = run("delete 4\nbogus\nappend 1 + 1\n");

        assert!(out.contains("error: line 4 is out of range (buffer has 0 lines)"));
        assert!(out.contains("error: unknown command: bogus"));
        assert!(out.contains("| 2"));
    }

    #[test]
    fn test_session_example_document() {
        let out = run("example\n");
        assert!(out.contains("| 80"));
        assert!(out.contains("| 30"));
    }
}
