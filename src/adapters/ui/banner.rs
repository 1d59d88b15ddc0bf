//! Startup banner: "TG-LEAVE" in figlet's standard font, shaded top to bottom.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const TITLE: &str = "TG-LEAVE";

/// Telegram blue (#229ed9) fading into white.
const TOP: (u8, u8, u8) = (0x22, 0x9e, 0xd9);
const BOTTOM: (u8, u8, u8) = (0xff, 0xff, 0xff);

fn shade(t: f64) -> Color {
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb {
        r: mix(TOP.0, BOTTOM.0),
        g: mix(TOP.1, BOTTOM.1),
        b: mix(TOP.2, BOTTOM.2),
    }
}

fn render_title() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|fig| fig.to_string()))
        .unwrap_or_else(|| format!("{}\n", TITLE))
}

pub fn print_welcome() {
    let mut out = stdout();
    let art = render_title();
    let lines: Vec<&str> = art.lines().filter(|l| !l.trim().is_empty()).collect();
    let last = lines.len().saturating_sub(1).max(1) as f64;

    for (i, line) in lines.iter().enumerate() {
        let _ = out.execute(SetForegroundColor(shade(i as f64 / last)));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
    }
    let _ = out.execute(SetForegroundColor(shade(0.0)));
    let _ = out.execute(Print(format!(
        "v{}  keep what matters, leave the rest\r\n\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
