use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::info;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Widget};

use crate::export::file_stem;
use crate::model::Outcomes;

const BAR_WIDTH: u16 = 12;
const BAR_GAP: u16 = 3;
pub const CHART_WIDTH: u16 = 3 * BAR_WIDTH + 2 * BAR_GAP + 2;
pub const CHART_HEIGHT: u16 = 16;

/// Names under the three bars.
#[derive(Debug, Clone)]
pub struct BarLabels {
    pub win: String,
    pub draw: String,
    pub loss: String,
}

impl Default for BarLabels {
    fn default() -> Self {
        Self {
            win: "Wins".to_string(),
            draw: "Draws".to_string(),
            loss: "Losses".to_string(),
        }
    }
}

impl BarLabels {
    /// Labels for a head-to-head chart: "<a> wins", "Draws", "<b> wins".
    pub fn head_to_head(a: &str, b: &str) -> Self {
        Self {
            win: format!("{a} wins"),
            draw: "Draws".to_string(),
            loss: format!("{b} wins"),
        }
    }
}

pub fn percentage(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(part) * 100.0 / f64::from(total)
    }
}

pub fn outcome_bar_chart(outcomes: Outcomes, title: &str, labels: &BarLabels) -> BarChart<'static> {
    let total = outcomes.total();
    let bar = |value: u32, label: &str, color: Color| {
        Bar::default()
            .value(u64::from(value))
            .label(label.to_string().into())
            .text_value(format!("{value} ({:.1}%)", percentage(value, total)))
            .style(Style::default().fg(color))
            .value_style(Style::default().fg(Color::Black).bg(color))
    };
    let bars = [
        bar(outcomes.wins, &labels.win, Color::Green),
        bar(outcomes.draws, &labels.draw, Color::Yellow),
        bar(outcomes.losses, &labels.loss, Color::Red),
    ];

    BarChart::default()
        .block(
            Block::default()
                .title(format!("Results Distribution for {title}"))
                .borders(Borders::ALL),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
}

/// Renders the chart off-screen and returns its text, one line per row.
pub fn render_to_text(outcomes: Outcomes, title: &str, labels: &BarLabels) -> String {
    let area = Rect::new(0, 0, CHART_WIDTH, CHART_HEIGHT);
    let mut buf = Buffer::empty(area);
    outcome_bar_chart(outcomes, title, labels).render(area, &mut buf);

    let mut out = String::new();
    for y in 0..area.height {
        let line: String = (0..area.width).map(|x| buf.get(x, y).symbol()).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Writes `<label>_stats_chart.txt` files into one directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    dir: PathBuf,
}

impl ChartRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn render(&self, outcomes: Outcomes, label: &str, labels: &BarLabels) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir {}", self.dir.display()))?;
        let path = self
            .dir
            .join(format!("{}_stats_chart.txt", file_stem(label)));
        write_chart(&path, &render_to_text(outcomes, label, labels))?;
        info!("chart saved to {}", path.display());
        Ok(path)
    }
}

fn write_chart(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("write chart {}", path.display()))
}

/// Shows the chart full-screen until any key is pressed.
pub fn show_in_terminal(outcomes: Outcomes, title: &str, labels: &BarLabels) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = (|| -> io::Result<()> {
        terminal.draw(|f| {
            let area = f.size();
            let area = Rect::new(
                area.x,
                area.y,
                area.width.min(CHART_WIDTH),
                area.height.min(CHART_HEIGHT),
            );
            f.render_widget(outcome_bar_chart(outcomes, title, labels), area);
        })?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res.context("chart display failed")
}
