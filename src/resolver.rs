//! Highlight resolution: which colors a cell gets.
//!
//! Rules are walked in declaration order and the first one that applies wins.
//! A cell-scoped rule applies to the cell of its own column when its condition
//! holds on that cell. A row-scoped rule evaluates its condition on the cell of
//! its own column and, when it holds, applies to every cell of the row. Scope
//! does not change priority; only order does.

use crate::format::{Highlight, LogFormat, OptionalColor, Scope};
use crate::parser::{Cell, LogLine};

/// Colors resolved for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellColors {
    pub fg: OptionalColor,
    pub bg: OptionalColor,
}

impl CellColors {
    fn from_highlight(highlight: &Highlight) -> Self {
        Self {
            fg: highlight.fg_color(),
            bg: highlight.bg_color(),
        }
    }
}

/// Resolve the colors of a single cell against the format's cell-scoped rules
pub fn resolve_cell(text: &str, column: usize, format: &LogFormat) -> CellColors {
    format
        .highlights()
        .iter()
        .filter(|h| h.scope() == Scope::Cell && h.column() == column)
        .find(|h| h.matches(text))
        .map(CellColors::from_highlight)
        .unwrap_or_default()
}

/// Resolve the colors of cell `column` in a row, honoring both scopes
pub fn resolve(cells: &[Cell], column: usize, format: &LogFormat) -> CellColors {
    format
        .highlights()
        .iter()
        .find(|h| applies(h, cells, column))
        .map(CellColors::from_highlight)
        .unwrap_or_default()
}

fn applies(highlight: &Highlight, cells: &[Cell], column: usize) -> bool {
    let applies_to_column = match highlight.scope() {
        Scope::Cell => highlight.column() == column,
        Scope::Row => true,
    };
    applies_to_column
        && cells
            .get(highlight.column())
            .is_some_and(|cell| highlight.matches(&cell.text))
}

/// Color every cell of a parsed line in one pass
///
/// Each rule's condition is evaluated at most once per row. Unparsed lines are
/// left untouched.
pub fn apply_highlights(line: &mut LogLine, format: &LogFormat) {
    let LogLine::Parsed(cells) = line else {
        return;
    };

    let highlights = format.highlights();
    let mut verdicts: Vec<Option<bool>> = vec![None; highlights.len()];
    let mut colors = Vec::with_capacity(cells.len());

    for column in 0..cells.len() {
        let mut resolved = CellColors::default();
        for (index, highlight) in highlights.iter().enumerate() {
            if highlight.scope() == Scope::Cell && highlight.column() != column {
                continue;
            }
            let holds = *verdicts[index].get_or_insert_with(|| {
                cells
                    .get(highlight.column())
                    .is_some_and(|cell| highlight.matches(&cell.text))
            });
            if holds {
                resolved = CellColors::from_highlight(highlight);
                break;
            }
        }
        colors.push(resolved);
    }

    for (cell, resolved) in cells.iter_mut().zip(colors) {
        cell.fg_color = resolved.fg;
        cell.bg_color = resolved.bg;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Color;
    use crate::parser::parse;

    const APP_PATTERN: &str = r"^(?<ts>\S+) (?<level>\S+) (?<msg>.*)$";
    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);
    const WHITE: Color = Color::rgb(255, 255, 255);

    fn app_format() -> LogFormat {
        LogFormat::new(APP_PATTERN)
    }

    fn colored(raw: &str, format: &LogFormat) -> LogLine {
        let mut line = parse(raw, format);
        apply_highlights(&mut line, format);
        line
    }

    #[test]
    fn test_matching_cell_gets_colors() {
        let mut format = app_format();
        format.add_highlight(Highlight::new(0, "== ERROR").with_bg_color(Some(RED)));

        let line = colored("t ERROR boom", &format);
        assert_eq!(line.cell(0).unwrap().bg_color, Some(RED));
        assert_eq!(line.cell(0).unwrap().fg_color, None);
        assert_eq!(line.cell(1).unwrap().bg_color, None);

        let line = colored("t INFO fine", &format);
        assert_eq!(line.cell(0).unwrap().bg_color, None);
    }

    #[test]
    fn test_first_match_wins() {
        let mut format = app_format();
        format.add_highlight(Highlight::new(0, "contains ERR").with_bg_color(Some(RED)));
        format.add_highlight(Highlight::new(0, "== ERROR").with_bg_color(Some(BLUE)));

        assert_eq!(resolve_cell("ERROR", 0, &format).bg, Some(RED));
        let line = colored("t ERROR boom", &format);
        assert_eq!(line.cell(0).unwrap().bg_color, Some(RED));
    }

    #[test]
    fn test_rules_for_other_columns_are_skipped() {
        let mut format = app_format();
        format.add_highlight(Highlight::new(1, "contains ERROR").with_fg_color(Some(RED)));
        format.add_highlight(Highlight::new(0, "== ERROR").with_fg_color(Some(BLUE)));

        assert_eq!(resolve_cell("ERROR", 0, &format).fg, Some(BLUE));
        assert_eq!(resolve_cell("ERROR", 1, &format).fg, Some(RED));
    }

    #[test]
    fn test_no_match_means_no_color() {
        let mut format = app_format();
        format.add_highlight(Highlight::new(0, "== ERROR").with_bg_color(Some(RED)));
        assert_eq!(resolve_cell("DEBUG", 0, &format), CellColors::default());
    }

    #[test]
    fn test_row_scope_colors_every_cell() {
        let mut format = app_format();
        format.add_highlight(
            Highlight::new(1, "contains panic")
                .with_scope(Scope::Row)
                .with_fg_color(Some(WHITE))
                .with_bg_color(Some(RED)),
        );

        let line = colored("t WARN thread panicked", &format);
        for cell in line.cells() {
            assert_eq!(cell.fg_color, Some(WHITE));
            assert_eq!(cell.bg_color, Some(RED));
        }

        let line = colored("t WARN all good", &format);
        assert!(line.cells().iter().all(|c| c.bg_color.is_none()));
    }

    #[test]
    fn test_declaration_order_beats_scope() {
        let mut format = app_format();
        format.add_highlight(Highlight::new(0, "== ERROR").with_bg_color(Some(BLUE)));
        format.add_highlight(
            Highlight::new(0, "== ERROR")
                .with_scope(Scope::Row)
                .with_bg_color(Some(RED)),
        );

        let line = colored("t ERROR boom", &format);
        // the cell rule comes first for column 0, the row rule covers the rest
        assert_eq!(line.cell(0).unwrap().bg_color, Some(BLUE));
        assert_eq!(line.cell(1).unwrap().bg_color, Some(RED));

        let mut reversed = app_format();
        reversed.add_highlight(
            Highlight::new(0, "== ERROR")
                .with_scope(Scope::Row)
                .with_bg_color(Some(RED)),
        );
        reversed.add_highlight(Highlight::new(0, "== ERROR").with_bg_color(Some(BLUE)));

        let line = colored("t ERROR boom", &reversed);
        assert_eq!(line.cell(0).unwrap().bg_color, Some(RED));
        assert_eq!(line.cell(1).unwrap().bg_color, Some(RED));
    }

    #[test]
    fn test_resolve_matches_apply_highlights() {
        let mut format = app_format();
        format.add_highlight(Highlight::new(1, "contains disk").with_fg_color(Some(BLUE)));
        format.add_highlight(
            Highlight::new(0, "== WARN")
                .with_scope(Scope::Row)
                .with_bg_color(Some(RED)),
        );

        let plain = parse("t WARN disk full", &format);
        let line = colored("t WARN disk full", &format);
        for column in 0..format.column_count() {
            let expected = resolve(plain.cells(), column, &format);
            let cell = line.cell(column).unwrap();
            assert_eq!((cell.fg_color, cell.bg_color), (expected.fg, expected.bg));
        }
    }

    #[test]
    fn test_out_of_range_rule_never_applies() {
        let mut format = app_format();
        format.add_highlight(
            Highlight::new(9, "!= x")
                .with_scope(Scope::Row)
                .with_bg_color(Some(RED)),
        );
        let line = colored("t INFO ok", &format);
        assert!(line.cells().iter().all(|c| c.bg_color.is_none()));
    }

    #[test]
    fn test_unparsed_line_is_untouched() {
        let mut format = app_format();
        format.add_highlight(Highlight::new(0, "!= x").with_bg_color(Some(RED)));
        let line = colored("nope", &format);
        assert_eq!(line, LogLine::Unparsed);
    }
}
