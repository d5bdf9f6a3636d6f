#![warn(missing_docs)]

/*!
This crate synthesizes chords as sums of sine waves, analyzes their spectra,
plays them on an audio device, and plots them.

```
use sound_of_you::*;

let config = ChordConfig::default()
    .duration(1.0)
    .notes(["E4", "G#4", "B4"]);
let synthesis = synthesize(&config).unwrap();
assert_eq!(synthesis.frequencies, [329.63, 415.3, 493.88]);
assert_eq!(synthesis.combined.len(), 44100);
```
*/

mod config;
pub mod gen;
mod io;
pub mod note;
#[cfg(feature = "plot")]
mod plot;
pub mod render;
pub mod synth;

pub use config::*;
pub use gen::*;
pub use io::*;
#[doc(inline)]
pub use note::{resolve, Letter, NoteName};
#[cfg(feature = "plot")]
#[cfg_attr(docsrs, doc(cfg(feature = "plot")))]
pub use plot::*;
pub use render::{Figure, RenderError, Renderer};
pub use rustfft::num_complex::Complex;
#[doc(inline)]
pub use synth::{synthesize, Synthesis};

/// Linearly interpolate two numbers
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}
