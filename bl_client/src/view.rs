//! Plain-text rendering of lobby state.

use bridge_lobby::{
    deal::DealOutcome,
    game::SeatLabel,
    session::{Role, SessionSelection},
    table::Table,
};
use std::fmt::Write;

/// Numbered table listing with seats in display order.
pub fn render_tables(tables: &[Table], selection: &SessionSelection) -> String {
    if tables.is_empty() {
        return "No tables. Use 'create NAME' to open one.".to_string();
    }

    let mut out = String::new();
    for (i, table) in tables.iter().enumerate() {
        let here = selection.table_id.as_deref() == Some(table.id.as_str());
        let status = if table.is_full() {
            "full".to_string()
        } else {
            format!("{} free", table.available_seat_count())
        };
        let _ = writeln!(
            out,
            "{}{}. {} ({})",
            if here { "*" } else { " " },
            i + 1,
            table.name,
            status
        );

        for (seat, occupant) in table.positions.iter() {
            let _ = writeln!(out, "      {:<5} {}", seat, occupant.unwrap_or("-"));
        }
        if !table.spectators.is_empty() {
            let _ = writeln!(out, "      watching: {}", table.spectators.join(", "));
        }
    }
    out.trim_end().to_string()
}

/// One-line description of the selection.
pub fn render_selection(selection: &SessionSelection, table: Option<&Table>) -> String {
    let Some(table_id) = selection.table_id.as_deref() else {
        return "Not at a table".to_string();
    };
    let name = table.map_or(table_id, |t| t.name.as_str());
    match (selection.role, selection.seat_label) {
        (Role::Player, Some(seat)) => format!("Seated at {} ({})", name, seat),
        (Role::Spectator, _) => format!("Watching {}", name),
        (Role::Player, None) => format!("At {}", name),
    }
}

/// Hands of a deal, in display order, with occupants and points.
pub fn render_deal(outcome: &DealOutcome) -> String {
    let mut out = format!("Deck: {}\n", outcome.deck_color);
    for seat in SeatLabel::DISPLAY_ORDER {
        if let Some(hand) = outcome.hand(seat) {
            let player = outcome.occupant(seat).unwrap_or("-");
            let _ = writeln!(out, "{}  [{}]", hand, player);
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_tables() {
        let out = render_tables(&[], &SessionSelection::default());
        assert!(out.contains("No tables"));
    }

    #[test]
    fn test_render_tables_marks_selection() {
        let mut table = Table::new("Demo");
        table.positions.set(SeatLabel::North, Some("ivan".to_string()));
        table.spectators.push("maria".to_string());
        let selection = SessionSelection::spectator(table.id.clone());

        let out = render_tables(std::slice::from_ref(&table), &selection);
        assert!(out.starts_with("*1. Demo (3 free)"));
        assert!(out.contains("NORTH ivan"));
        assert!(out.contains("watching: maria"));
    }

    #[test]
    fn test_render_selection() {
        let table = Table::new("Demo");
        let seated = SessionSelection::player(table.id.clone(), SeatLabel::East);
        assert_eq!(render_selection(&seated, Some(&table)), "Seated at Demo (EAST)");
        assert_eq!(
            render_selection(&SessionSelection::default(), None),
            "Not at a table"
        );
    }
}
