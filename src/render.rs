use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_search::{Board, Cell, WIDTH};

/// Disc colours for the two players
#[derive(Copy, Clone, Debug)]
pub struct Palette {
    player_one: Color,
    player_two: Color,
}

impl Palette {
    pub fn new(cvd_mode: bool) -> Self {
        if cvd_mode {
            // magenta and green stay distinguishable for red-green colour blindness
            Self {
                player_one: Color::Rgb { r: 227, g: 60, b: 239 },
                player_two: Color::Rgb { r: 0, g: 255, b: 0 },
            }
        } else {
            Self {
                player_one: Color::Red,
                player_two: Color::Yellow,
            }
        }
    }
}

pub fn display(board: &Board, palette: Palette) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (0..WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for row in board.rows() {
        for cell in row.iter() {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match cell {
                        Cell::PlayerOne => palette.player_one,
                        Cell::PlayerTwo => palette.player_two,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
