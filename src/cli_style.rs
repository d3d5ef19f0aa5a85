use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Stylize};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

pub fn get_styles() -> Styles {
    clap::builder::Styles::styled()
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .invalid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Green))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

pub mod colors {
    use crossterm::style::Color;

    pub const GOLD: Color = Color::Rgb {
        r: 218,
        g: 165,
        b: 32,
    };
    pub const BLUE: Color = Color::Rgb {
        r: 100,
        g: 149,
        b: 237,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 60,
        g: 179,
        b: 113,
    };
    pub const RED: Color = Color::Rgb {
        r: 205,
        g: 92,
        b: 92,
    };
    pub const ORANGE: Color = Color::Rgb {
        r: 255,
        g: 165,
        b: 0,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

pub mod marks {
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const BULLET: &str = "•";
    pub const NOTE: &str = "♪";
}

pub fn print_banner() {
    let banner = r#"
     ♪  S O N G   B O O K  ♪
"#;
    println!("{}", banner.with(colors::GOLD).bold());
    let subtitle = "  ──────────  catalog console  ──────────";
    println!("{}", subtitle.with(colors::DIM));
    println!();
}

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        marks::CHECK.with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        marks::CROSS.with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::ORANGE).bold(),
        message.with(colors::ORANGE)
    );
}

pub fn print_info(message: &str) {
    println!(
        " {} {}",
        "ℹ".with(colors::BLUE).bold(),
        message.with(colors::BLUE)
    );
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        marks::BULLET.with(colors::GOLD),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        marks::BULLET.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

pub fn print_lyrics(lyrics: &str) {
    println!();
    for line in lyrics.lines() {
        println!("    {}", line.with(colors::WHITE));
    }
    println!();
}

/// Width-aware table for song listings.
pub struct SongTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl SongTable {
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        SongTable {
            headers: headers.into_iter().map(String::from).collect(),
            rows: Vec::new(),
            col_widths,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(cell.width());
            }
        }
        self.rows.push(row);
    }

    fn pad(cell: &str, width: usize) -> String {
        let padding = width.saturating_sub(cell.width());
        format!("{}{}", cell, " ".repeat(padding))
    }

    pub fn print(&self) {
        let header_line: Vec<String> = self
            .headers
            .iter()
            .zip(&self.col_widths)
            .map(|(header, width)| Self::pad(header, *width))
            .collect();
        println!(
            "  {}",
            header_line.join("  ").with(colors::GOLD).bold()
        );

        let total_width: usize =
            self.col_widths.iter().sum::<usize>() + 2 * self.col_widths.len().saturating_sub(1);
        println!("  {}", "─".repeat(total_width).with(colors::DIM));

        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .zip(&self.col_widths)
                .map(|(cell, width)| Self::pad(cell, *width))
                .collect();
            println!("  {}", line.join("  ").with(colors::WHITE));
        }
    }
}

pub fn get_prompt() -> String {
    format!("{} ", marks::NOTE)
}

pub fn print_welcome(server_url: &str) {
    print_banner();
    print_key_value("server", server_url);
    println!(
        "  {}",
        "Type 'help' for the command list, 'exit' to leave.".with(colors::DIM)
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", "  Go in peace.".with(colors::GOLD));
}

pub fn flush() {
    let _ = io::stdout().flush();
}
