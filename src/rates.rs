//! The rate board command: fetch the table once and render it.

use anyhow::Result;
use comfy_table::{Attribute, Cell, CellAlignment, Color};

use crate::config::AppConfig;
use crate::currency::{CurrencyCode, RateBoard};
use crate::providers::status_api::StatusApiProvider;
use crate::ui;

pub async fn run(config: &AppConfig, currency_override: Option<&str>) -> Result<()> {
    let selected = match currency_override {
        Some(code) => code.parse()?,
        None => config.selected_currency()?,
    };

    let provider = StatusApiProvider::new(config.base_url());
    let mut board = RateBoard::new(selected);

    let spinner = ui::new_spinner("Fetching exchange rates...");
    // A failed fetch is logged inside refresh; the board still renders
    // with its last known state.
    board.refresh(&provider).await;
    spinner.finish_and_clear();

    println!("{}", display_board(&board));
    Ok(())
}

pub fn display_board(board: &RateBoard) -> String {
    let mut table = ui::new_styled_table();

    let mut header = vec![ui::header_cell("")];
    for code in CurrencyCode::ALL {
        header.push(ui::header_cell(code.as_str()));
    }
    table.set_header(header);

    for currency in board.currencies() {
        let name = if currency.code == board.selected() {
            Cell::new(format!("{} *", currency.code)).add_attribute(Attribute::Bold)
        } else {
            Cell::new(currency.code.to_string())
        };

        let mut row = vec![name];
        for code in CurrencyCode::ALL {
            if code == currency.code {
                row.push(
                    Cell::new("—")
                        .fg(Color::DarkGrey)
                        .set_alignment(CellAlignment::Right),
                );
            } else {
                let rate = currency.pairs.get(&code).copied().flatten();
                row.push(ui::format_optional_cell(rate, |r| format!("{r:.4}")));
            }
        }
        table.add_row(row);
    }

    let mut output = format!(
        "{} (row converts to column, {} selected)\n\n",
        ui::style_text("Exchange rates", ui::StyleType::Title),
        board.selected()
    );
    output.push_str(&table.to_string());

    match board.fetched_at() {
        Some(ts) => output.push_str(&format!(
            "\n\nAs of {}",
            ts.format("%Y-%m-%d %H:%M UTC")
        )),
        None => output.push_str(&format!(
            "\n\n{}",
            ui::style_text("No rates fetched yet", ui::StyleType::Subtle)
        )),
    }
    output
}
