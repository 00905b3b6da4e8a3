use colored::{Color, Colorize as _};
use mazecore::{GridEncoding, Pixel};

use crate::settings::Settings;

/// Text for each pixel kind, every pixel is drawn as one such string.
#[derive(Debug, Clone)]
pub struct Style {
    pub wall: String,
    pub open: String,
    pub path: String,
    pub path_color: Option<Color>,
}

impl Style {
    pub fn from_settings(settings: &Settings, plain: bool) -> Self {
        Self {
            wall: settings.get_wall(),
            open: settings.get_open(),
            path: settings.get_path(),
            path_color: if plain { None } else { settings.get_path_color() },
        }
    }

    /// Same alphabet as the grid's `Display`, doubled.
    pub fn ascii() -> Self {
        Self {
            wall: "##".to_string(),
            open: "  ".to_string(),
            path: "**".to_string(),
            path_color: None,
        }
    }

    fn pixel(&self, pixel: Pixel) -> String {
        match pixel {
            Pixel::Open => self.open.clone(),
            Pixel::Wall => self.wall.clone(),
            Pixel::Solved => match self.path_color {
                Some(color) => self.path.color(color).to_string(),
                None => self.path.clone(),
            },
        }
    }
}

pub fn render(grid: &GridEncoding, style: &Style) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        for &pixel in row {
            out.push_str(&style.pixel(pixel));
        }
        out.push('\n');
    }
    out
}
