use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use pezzottify_recommender::{EngineStats, Recommendation};
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    let accent = |color: AnsiColor| Style::new().bold().fg_color(Some(Color::Ansi(color)));
    Styles::styled()
        .usage(accent(AnsiColor::Cyan).underline())
        .header(accent(AnsiColor::Cyan).underline())
        .literal(accent(AnsiColor::Green))
        .invalid(accent(AnsiColor::Red))
        .error(accent(AnsiColor::Red))
        .valid(accent(AnsiColor::Green))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const CYAN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 255,
    };
    pub const MAGENTA: Color = Color::Rgb {
        r: 255,
        g: 0,
        b: 255,
    };
    pub const PURPLE: Color = Color::Rgb {
        r: 180,
        g: 100,
        b: 255,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 136,
    };
    pub const ORANGE: Color = Color::Rgb {
        r: 255,
        g: 165,
        b: 0,
    };
    pub const YELLOW: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 0,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
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

// ═══════════════════════════════════════════════════════════════════════════════
// Box Drawing Characters
// ═══════════════════════════════════════════════════════════════════════════════

pub mod box_chars {
    pub const DOUBLE_TOP_LEFT: &str = "╔";
    pub const DOUBLE_TOP_RIGHT: &str = "╗";
    pub const DOUBLE_BOTTOM_LEFT: &str = "╚";
    pub const DOUBLE_BOTTOM_RIGHT: &str = "╝";
    pub const DOUBLE_HORIZONTAL: &str = "═";
    pub const DOUBLE_VERTICAL: &str = "║";

    pub const SINGLE_HORIZONTAL: &str = "─";
    pub const SINGLE_VERTICAL: &str = "│";

    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";

    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";

    pub const ARROW_RIGHT: &str = "▶";
    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const DIAMOND: &str = "◆";
    pub const STAR: &str = "★";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_banner() {
    let banner = r#"
    ██████╗ ███████╗ ██████╗ ██████╗ ███╗   ███╗███╗   ███╗███████╗███╗   ██╗██████╗
    ██╔══██╗██╔════╝██╔════╝██╔═══██╗████╗ ████║████╗ ████║██╔════╝████╗  ██║██╔══██╗
    ██████╔╝█████╗  ██║     ██║   ██║██╔████╔██║██╔████╔██║█████╗  ██╔██╗ ██║██║  ██║
    ██╔══██╗██╔══╝  ██║     ██║   ██║██║╚██╔╝██║██║╚██╔╝██║██╔══╝  ██║╚██╗██║██║  ██║
    ██║  ██║███████╗╚██████╗╚██████╔╝██║ ╚═╝ ██║██║ ╚═╝ ██║███████╗██║ ╚████║██████╔╝
    ╚═╝  ╚═╝╚══════╝ ╚═════╝ ╚═════╝ ╚═╝     ╚═╝╚═╝     ╚═╝╚══════╝╚═╝  ╚═══╝╚═════╝
"#;

    let gradient_colors = [
        colors::CYAN,
        colors::CYAN,
        colors::PURPLE,
        colors::PURPLE,
        colors::MAGENTA,
        colors::MAGENTA,
        colors::MAGENTA,
    ];

    for (i, line) in banner.lines().enumerate() {
        let color = gradient_colors.get(i).unwrap_or(&colors::CYAN);
        println!("{}", line.with(*color).bold());
    }

    let subtitle = "  ═══════════════════  PEZZOTTIFY RECOMMENDER  ═══════════════════";
    println!("{}", subtitle.with(colors::DIM));
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.to_string().with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        box_chars::CROSS_MARK.to_string().with(colors::RED).bold(),
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

// ═══════════════════════════════════════════════════════════════════════════════
// Section Headers
// ═══════════════════════════════════════════════════════════════════════════════

const SECTION_WIDTH: usize = 60;

pub fn print_section_header(title: &str) {
    let title_len = title.width();
    let padding = SECTION_WIDTH.saturating_sub(title_len + 4) / 2;
    let rest = SECTION_WIDTH.saturating_sub(title_len + 4 + padding);

    println!();
    println!(
        "{}{} {} {}{}",
        box_chars::ROUND_TOP_LEFT.with(colors::CYAN),
        box_chars::SINGLE_HORIZONTAL.repeat(padding).with(colors::CYAN),
        title.with(colors::CYAN).bold().attribute(Attribute::Italic),
        box_chars::SINGLE_HORIZONTAL.repeat(rest).with(colors::CYAN),
        box_chars::ROUND_TOP_RIGHT.with(colors::CYAN)
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        box_chars::ROUND_BOTTOM_LEFT.with(colors::CYAN),
        box_chars::SINGLE_HORIZONTAL
            .repeat(SECTION_WIDTH)
            .with(colors::CYAN),
        box_chars::ROUND_BOTTOM_RIGHT.with(colors::CYAN)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Key-Value and List Display
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::PURPLE),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_key_value_highlight(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::DIAMOND.with(colors::MAGENTA),
        format!("{}:", key).with(colors::CYAN).bold(),
        value.with(colors::GREEN).bold()
    );
}

pub fn print_list_item(item: &str, indent: usize) {
    println!(
        "{}{}  {}",
        "  ".repeat(indent),
        box_chars::ARROW_RIGHT.with(colors::CYAN),
        item.with(colors::WHITE)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table Display
// ═══════════════════════════════════════════════════════════════════════════════

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        TableBuilder {
            headers: headers.into_iter().map(String::from).collect(),
            rows: Vec::new(),
            col_widths,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = self.col_widths.get_mut(i) {
                *width = (*width).max(cell.width());
            }
        }
        self.rows.push(row);
    }

    fn print_border(&self, left: &str, junction: &str, right: &str) {
        let segments: Vec<String> = self
            .col_widths
            .iter()
            .map(|width| box_chars::SINGLE_HORIZONTAL.repeat(width + 2))
            .collect();
        println!(
            "{}{}{}",
            left.with(colors::CYAN),
            segments.join(junction).with(colors::CYAN),
            right.with(colors::CYAN)
        );
    }

    fn print_cells(&self, cells: &[String], color: CtColor, bold: bool) {
        print!("{}", box_chars::SINGLE_VERTICAL.with(colors::CYAN));
        for (i, cell) in cells.iter().enumerate() {
            let width = self.col_widths.get(i).copied().unwrap_or(0);
            let padding = width.saturating_sub(cell.width());
            let styled = if bold {
                cell.clone().with(color).bold()
            } else {
                cell.clone().with(color)
            };
            print!(" {}{} ", styled, " ".repeat(padding));
            print!("{}", box_chars::SINGLE_VERTICAL.with(colors::CYAN));
        }
        println!();
    }

    pub fn print(&self) {
        if self.col_widths.is_empty() {
            return;
        }
        self.print_border(box_chars::ROUND_TOP_LEFT, box_chars::T_TOP, box_chars::ROUND_TOP_RIGHT);
        self.print_cells(&self.headers, colors::CYAN, true);
        self.print_border(box_chars::T_LEFT, box_chars::CROSS, box_chars::T_RIGHT);
        for row in &self.rows {
            self.print_cells(row, colors::WHITE, false);
        }
        self.print_border(
            box_chars::ROUND_BOTTOM_LEFT,
            box_chars::T_BOTTOM,
            box_chars::ROUND_BOTTOM_RIGHT,
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Recommendation Display
// ═══════════════════════════════════════════════════════════════════════════════

const MAX_TITLE_WIDTH: usize = 40;

fn shorten(title: &str) -> String {
    if title.width() <= MAX_TITLE_WIDTH {
        return title.to_string();
    }
    let mut shortened = String::new();
    for ch in title.chars() {
        if shortened.width() + 4 > MAX_TITLE_WIDTH {
            break;
        }
        shortened.push(ch);
    }
    shortened.push_str("...");
    shortened
}

pub fn print_recommendations_table(recommendations: &[Recommendation]) {
    let mut table = TableBuilder::new(vec!["Rank", "Title", "Score", "Source"]);
    for (i, rec) in recommendations.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            shorten(&rec.title),
            format!("{:.2}", rec.score),
            rec.source.to_string(),
        ]);
    }
    table.print();
}

pub fn print_ranked_list(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        print_empty_list("No recommendations available.");
        return;
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{:>2}.", i + 1).with(colors::DIM),
            rec.title.as_str().with(colors::WHITE),
            format!("(Score: {:.2})", rec.score).with(colors::YELLOW)
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt Styling
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_command_echo(command: &str) {
    println!(
        "{}{}{}  {}",
        "❯".with(colors::CYAN).bold(),
        "❯".with(colors::PURPLE).bold(),
        "❯".with(colors::MAGENTA).bold(),
        command.with(colors::GREEN).bold()
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Welcome Message
// ═══════════════════════════════════════════════════════════════════════════════

fn print_boxed_line(content: &str, visible_width: usize, box_width: usize) {
    println!(
        "  {}{}{}{}",
        box_chars::DOUBLE_VERTICAL.with(colors::PURPLE),
        content,
        " ".repeat(box_width.saturating_sub(visible_width)),
        box_chars::DOUBLE_VERTICAL.with(colors::PURPLE)
    );
}

pub fn print_welcome(snapshot_path: &str, stats: &EngineStats) {
    print_banner();

    let box_width = 64;
    println!(
        "  {}{}{}",
        box_chars::DOUBLE_TOP_LEFT.with(colors::PURPLE),
        box_chars::DOUBLE_HORIZONTAL
            .repeat(box_width)
            .with(colors::PURPLE),
        box_chars::DOUBLE_TOP_RIGHT.with(colors::PURPLE)
    );

    let ready = "Recommendation engine ready";
    print_boxed_line(
        &format!("  {}", ready.with(colors::GREEN)),
        ready.width() + 2,
        box_width,
    );
    print_boxed_line("", 0, box_width);

    let lines = [
        ("Snapshot", snapshot_path.to_string()),
        ("Version", env!("CARGO_PKG_VERSION").to_string()),
        (
            "Catalog",
            format!("{} tracks, {} artists", stats.tracks, stats.artists),
        ),
        (
            "Users",
            format!("{} in {} communities", stats.users, stats.communities),
        ),
    ];
    for (key, value) in lines {
        let content = format!("  {} {}", format!("{}:", key).with(colors::DIM), value);
        print_boxed_line(&content, key.width() + 1 + 1 + value.width() + 2, box_width);
    }

    print_boxed_line("", 0, box_width);
    let help_msg = "  Type 'help' for available commands";
    print_boxed_line(
        &help_msg.with(colors::DIM).to_string(),
        help_msg.width(),
        box_width,
    );

    println!(
        "  {}{}{}",
        box_chars::DOUBLE_BOTTOM_LEFT.with(colors::PURPLE),
        box_chars::DOUBLE_HORIZONTAL
            .repeat(box_width)
            .with(colors::PURPLE),
        box_chars::DOUBLE_BOTTOM_RIGHT.with(colors::PURPLE)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Help Display
// ═══════════════════════════════════════════════════════════════════════════════

pub struct CommandHelp {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
}

pub fn print_help(commands: &[CommandHelp]) {
    print_section_header("Available Commands");
    println!();

    fn print_command_group(title: &str, names: &[&str], commands: &[CommandHelp], color: CtColor) {
        println!(
            "  {} {}",
            box_chars::DIAMOND.with(color),
            title.with(color).bold()
        );
        for cmd in commands.iter().filter(|c| names.contains(&c.name)) {
            println!(
                "      {} {}  {}",
                cmd.name.with(colors::GREEN).bold(),
                cmd.args.with(colors::DIM),
                cmd.description.with(colors::WHITE)
            );
        }
        println!();
    }

    print_command_group(
        "Recommendations",
        &["recommend", "pillars", "search"],
        commands,
        colors::CYAN,
    );
    print_command_group("Users", &["community", "user"], commands, colors::MAGENTA);
    print_command_group("System", &["stats", "help", "exit"], commands, colors::ORANGE);

    print_section_footer();
}

pub fn print_pillar_header(name: &str) {
    println!();
    println!(
        "  {} {}",
        box_chars::STAR.with(colors::YELLOW),
        format!("[{}]", name).with(colors::YELLOW).bold()
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Goodbye Message
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_goodbye() {
    println!();
    println!(
        "  {} {}",
        "👋".with(colors::CYAN),
        "Goodbye! Thanks for using Pezzottify Recommender"
            .with(colors::PURPLE)
            .bold()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_long_titles() {
        assert_eq!(shorten("Short"), "Short");
        let long = "A".repeat(60);
        let short = shorten(&long);
        assert!(short.ends_with("..."));
        assert!(short.width() <= MAX_TITLE_WIDTH);
    }

    #[test]
    fn table_widths_follow_widest_cell() {
        let mut table = TableBuilder::new(vec!["Rank", "Title"]);
        table.add_row(vec!["1".to_string(), "A much longer title".to_string()]);
        assert_eq!(table.col_widths, vec![4, "A much longer title".len()]);
    }
}
