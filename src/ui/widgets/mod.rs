use crate::decorate::{DecoratedNode, DecoratedTree};
use crate::model::IconColor;
use crate::ui::components::Row;
use once_cell::sync::Lazy;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(.*)<span> \((.*)\)</span>$").expect("annotation pattern is valid")
});

/// Splits a decorated title into the display name and its inline
/// coming-soon annotation, if any.
pub fn split_title(title: &str) -> (&str, Option<&str>) {
    match ANNOTATION.captures(title) {
        Some(caps) => {
            let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let note = caps.get(2).map(|m| m.as_str());
            (name, note)
        }
        None => (title, None),
    }
}

pub fn icon_color(color: Option<IconColor>) -> Color {
    match color {
        Some(IconColor::Black) => Color::Gray,
        Some(IconColor::Blue) => Color::Blue,
        Some(IconColor::Green) => Color::Green,
        None => Color::Yellow,
    }
}

/// Truncates to `max` display columns, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

pub struct CollectionTreeWidget<'a> {
    tree: &'a DecoratedTree,
    rows: &'a [Row],
    expanded: &'a dyn Fn(&str) -> bool,
    selected: Option<usize>,
    title: &'a str,
}

impl<'a> CollectionTreeWidget<'a> {
    pub fn new(tree: &'a DecoratedTree, rows: &'a [Row], expanded: &'a dyn Fn(&str) -> bool) -> Self {
        Self {
            tree,
            rows,
            expanded,
            selected: None,
            title: "Collection",
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn marker(&self, row: &Row, node: &DecoratedNode) -> &'static str {
        if !node.folder {
            return "•";
        }
        if node.is_disabled() {
            return "◦";
        }
        if (self.expanded)(node.id.as_str()) && !self.tree.children(row.node).is_empty() {
            "▾"
        } else {
            "▸"
        }
    }

    fn row_line(&self, row: &Row, width: usize) -> Line<'a> {
        let Some(node) = self.tree.get(row.node) else {
            return Line::from("");
        };
        let indent = "  ".repeat(row.depth);
        let marker = self.marker(row, node);
        let (name, note) = split_title(&node.title);

        let prefix = format!("{}{} ", indent, marker);
        let budget = width.saturating_sub(prefix.width());
        let name_style = if node.is_disabled() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        let mut spans = vec![
            Span::styled(prefix, Style::default().fg(icon_color(node.icon_color))),
            Span::styled(truncate(name, budget), name_style),
        ];
        if let Some(note) = note {
            let remaining = budget.saturating_sub(name.width());
            if remaining > 3 {
                spans.push(Span::styled(
                    truncate(&format!(" ({})", note), remaining),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ));
            }
        }
        Line::from(spans)
    }
}

impl Widget for CollectionTreeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.title);

        let width = block.inner(area).width as usize;
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| ListItem::new(self.row_line(row, width.saturating_sub(1))))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        state.select(self.selected);
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_title() {
        assert_eq!(split_title("Unit 2<span> (Soon)</span>"), ("Unit 2", Some("Soon")));
        assert_eq!(split_title("Unit 2<span> ()</span>"), ("Unit 2", Some("")));
        assert_eq!(split_title("Plain"), ("Plain", None));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 6), "a lon…");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_icon_colors() {
        assert_eq!(icon_color(Some(IconColor::Green)), Color::Green);
        assert_eq!(icon_color(None), Color::Yellow);
    }
}
