//! Property-based tests for parsing, highlighting and cache invalidation.

use std::sync::Arc;

use proptest::prelude::*;
use rltable::format::{Color, Highlight, LogFormat};
use rltable::line_source::{ChangeKind, InMemoryLineProvider, LineCountChange, LineProvider};
use rltable::model::{process_line, LogModel, ModelEvent};
use rltable::parser::parse;
use rltable::resolver::resolve_cell;

const APP_PATTERN: &str = r"^(?<ts>\S+) (?<level>\S+) (?<msg>.*)$";

// ===== Arbitrary Strategies =====

fn arb_level() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("DEBUG".to_string()),
        Just("INFO".to_string()),
        Just("WARN".to_string()),
        Just("ERROR".to_string()),
    ]
}

/// Mix of well-formed lines and arbitrary text that may not match
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        ("[0-9:-]{1,20}", arb_level(), "[ -~]{0,40}")
            .prop_map(|(ts, level, msg)| format!("{} {} {}", ts, level, msg)),
        "[ -~]{0,60}",
    ]
}

fn arb_color() -> impl Strategy<Value = Color> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Color::rgb(r, g, b))
}

fn format_with_rules(rules: &[(String, Color)]) -> LogFormat {
    let mut format = LogFormat::new(APP_PATTERN);
    for (level, color) in rules {
        format.add_highlight(
            Highlight::new(0, format!("== {}", level)).with_bg_color(Some(*color)),
        );
    }
    format
}

proptest! {
    #[test]
    fn parse_is_pure(line in arb_line()) {
        let format = LogFormat::new(APP_PATTERN);
        let twin = LogFormat::new(APP_PATTERN);
        let first = parse(&line, &format);
        prop_assert_eq!(&first, &parse(&line, &format));
        prop_assert_eq!(&first, &parse(&line, &twin));
    }

    #[test]
    fn parsed_lines_have_one_cell_per_column(line in arb_line()) {
        let format = LogFormat::new(APP_PATTERN);
        let parsed = parse(&line, &format);
        if parsed.is_valid() {
            prop_assert_eq!(parsed.cells().len(), format.column_count());
        } else {
            prop_assert!(parsed.cells().is_empty());
        }
    }

    #[test]
    fn first_matching_rule_wins(
        level in arb_level(),
        first in arb_color(),
        second in arb_color(),
    ) {
        let format = format_with_rules(&[
            (level.clone(), first),
            (level.clone(), second),
        ]);
        prop_assert_eq!(resolve_cell(&level, 0, &format).bg, Some(first));

        let line = process_line(&format!("t {} msg", level), &format);
        prop_assert_eq!(line.cell(0).and_then(|c| c.bg_color), Some(first));
    }

    #[test]
    fn model_queries_are_idempotent(
        lines in prop::collection::vec(arb_line(), 1..30),
        queries in prop::collection::vec((0usize..40, 0usize..3), 1..40),
    ) {
        let provider: Arc<dyn LineProvider> = Arc::new(InMemoryLineProvider::from_lines(&lines));
        let mut model = LogModel::with_format(provider, Arc::new(LogFormat::new(APP_PATTERN)));
        for (row, column) in queries {
            let first = model.cell(row, column);
            prop_assert_eq!(first, model.cell(row, column));
        }
    }

    #[test]
    fn append_never_changes_existing_rows(
        initial in prop::collection::vec(arb_line(), 0..20),
        appended in prop::collection::vec(arb_line(), 1..20),
    ) {
        let provider = Arc::new(InMemoryLineProvider::from_lines(&initial));
        let line_provider: Arc<dyn LineProvider> = provider.clone();
        let mut model = LogModel::with_format(line_provider, Arc::new(LogFormat::new(APP_PATTERN)));
        let before: Vec<_> = (0..initial.len()).map(|row| model.row(row)).collect();

        let change = provider.append_lines(&appended);
        let end = initial.len() + appended.len();
        prop_assert_eq!(
            model.on_line_count_changed(change),
            ModelEvent::RowsInserted { start: initial.len(), end }
        );
        for (row, cached) in before.iter().enumerate() {
            prop_assert_eq!(&model.row(row), cached);
        }
        for (offset, raw) in appended.iter().enumerate() {
            let fresh = process_line(raw, &LogFormat::new(APP_PATTERN));
            model.row(initial.len() + offset);
            prop_assert_eq!(model.cached_row(initial.len() + offset), Some(&fresh));
        }
    }

    #[test]
    fn only_growth_is_an_append(new_count in 0usize..1000, old_count in 0usize..1000) {
        let change = LineCountChange::new(new_count, old_count);
        prop_assert_eq!(change.is_append(), new_count > old_count);
        match change.kind() {
            ChangeKind::Append { start, end } => {
                prop_assert_eq!((start, end), (old_count, new_count));
            }
            ChangeKind::Reset => prop_assert!(new_count <= old_count),
        }
    }
}
