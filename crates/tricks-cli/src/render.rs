use crate::config::CardStyle;
use tricks_core::game::mind_reader::{BitCard, CARD_COUNT};
use tricks_core::model::card::Card;
use tricks_core::model::packet::{ROW_COUNT, Row};

pub fn card_label(card: Card, style: CardStyle) -> String {
    match style {
        CardStyle::Short => card.to_string(),
        CardStyle::Long => card.long_name(),
    }
}

/// One line per row, numbered the way the player answers.
pub fn render_rows(rows: &[Row; ROW_COUNT], style: CardStyle) -> String {
    let width = match style {
        CardStyle::Short => 4,
        CardStyle::Long => 18,
    };
    let mut out = String::new();
    for (index, row) in rows.iter().enumerate() {
        out.push_str(&format!("Row {}:", index + 1));
        for card in row.cards() {
            out.push_str(&format!(" {:<width$}", card_label(*card, style)));
        }
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
    }
    out
}

pub fn render_bit_card(card: BitCard) -> String {
    let numbers = card
        .numbers()
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Card {} of {CARD_COUNT}\nNumbers on this card:\n{numbers}\n",
        card.index() + 1
    )
}
