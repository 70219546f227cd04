use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use eventboard_core::feed::Feed;
use eventboard_core::{Board, arrange};

use crate::render::render_board;

pub fn run(feed: &Feed, now: &DateTime<Tz>, all: bool, json: bool) -> Result<()> {
    let arrangement = arrange(&feed.events, now);
    let board = Board::build(&arrangement, now);

    if json {
        let output = serde_json::json!({
            "now": now.to_rfc3339(),
            "timezone": now.timezone().name(),
            "arrangement": arrangement,
            "board": board,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", render_board(&board, &now.timezone(), all));

    Ok(())
}
