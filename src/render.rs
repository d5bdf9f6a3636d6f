//! Plot descriptions for a synthesized chord
//!
//! Nothing here draws anything. A [`Renderer`] turns [`Figure`]s into pixels.

use crate::Synthesis;

/// An error encountered when rendering figures
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The window could not be created or crashed
    #[error("{0}")]
    Window(String),
}

/// Something that can show figures
pub trait Renderer {
    /// Render the figures, returning once they are no longer shown
    fn render(&mut self, figures: Vec<Figure>) -> Result<(), RenderError>;
}

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red in [0, 1]
    pub r: f32,
    /// Green in [0, 1]
    pub g: f32,
    /// Blue in [0, 1]
    pub b: f32,
}

impl Rgb {
    /// Convert hue, saturation, and value to RGB
    ///
    /// Hue wraps around, so any finite value is accepted.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h = h.rem_euclid(1.0) * 6.0;
        let i = h.floor();
        let f = h - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match i as u8 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Rgb { r, g, b }
    }
    /// Convert to 8-bit channels
    pub fn to_u8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Assign each of `n` notes a color from a rainbow
pub fn note_colors(n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| Rgb::from_hsv(i as f32 / (n as f32 - 1.3), 1.0, 0.9))
        .collect()
}

/// A labeled line
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// The legend entry
    pub label: String,
    /// The line color
    pub color: Rgb,
    /// `[x, y]` points in drawing order
    pub points: Vec<[f64; 2]>,
}

/// Text placed at a point in plot coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Where the text is anchored
    pub position: [f64; 2],
    /// The text
    pub text: String,
    /// The text color
    pub color: Rgb,
}

/// A single plot
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// The plot title
    pub title: String,
    /// The x axis title
    pub x_label: String,
    /// The y axis title
    pub y_label: String,
    /// The visible x range, if it should not fit the data
    pub x_limits: Option<(f64, f64)>,
    /// The lines
    pub series: Vec<Series>,
    /// Extra text
    pub annotations: Vec<Annotation>,
}

const DEFAULT_LINE: Rgb = Rgb {
    r: 0.12,
    g: 0.47,
    b: 0.71,
};

/// Plot the combined waveform against time
pub fn time_domain_figure(synthesis: &Synthesis) -> Figure {
    Figure {
        title: "Sound of You (Time Domain)".into(),
        x_label: "Time (s)".into(),
        y_label: "Amplitude".into(),
        x_limits: None,
        series: vec![Series {
            label: "Chord".into(),
            color: DEFAULT_LINE,
            points: synthesis
                .time_axis
                .iter()
                .zip(&synthesis.combined)
                .map(|(&t, &s)| [t, s])
                .collect(),
        }],
        annotations: Vec::new(),
    }
}

/// Plot each note's spectrum magnitude against frequency
///
/// The view is limited to 50 Hz around the chord's notes and points outside it
/// are dropped. Each caption is placed at its note's frequency and peak magnitude.
pub fn frequency_domain_figure(synthesis: &Synthesis, captions: &[String]) -> Figure {
    let lowest = synthesis.frequencies.iter().copied().fold(f64::INFINITY, f64::min);
    let highest = synthesis
        .frequencies
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = (lowest - 50.0, highest + 50.0);

    let mut order: Vec<usize> = (0..synthesis.frequency_bins.len())
        .filter(|&k| (lo..=hi).contains(&synthesis.frequency_bins[k]))
        .collect();
    order.sort_by(|&a, &b| {
        synthesis.frequency_bins[a].total_cmp(&synthesis.frequency_bins[b])
    });

    let colors = note_colors(synthesis.note_count());
    let mut series = Vec::with_capacity(synthesis.note_count());
    let mut annotations = Vec::new();
    for (i, (note, &freq)) in synthesis
        .notes
        .iter()
        .zip(&synthesis.frequencies)
        .enumerate()
    {
        let magnitudes = synthesis.magnitudes(i);
        series.push(Series {
            label: format!("Note {note} ({freq:?} Hz)"),
            color: colors[i],
            points: order
                .iter()
                .map(|&k| [synthesis.frequency_bins[k], magnitudes[k]])
                .collect(),
        });
        if let Some(caption) = captions.get(i) {
            let peak = magnitudes.iter().copied().fold(0.0, f64::max);
            annotations.push(Annotation {
                position: [freq, peak],
                text: caption.clone(),
                color: colors[i],
            });
        }
    }

    Figure {
        title: "Sound of You (Frequency Domain)".into(),
        x_label: "Frequency (Hz)".into(),
        y_label: "Magnitude".into(),
        x_limits: Some((lo, hi)),
        series,
        annotations,
    }
}
