use anyhow::{Context, Result};
use sound_of_you::*;

fn load_config() -> Result<ChordConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(ChordConfig::default());
    };
    #[cfg(feature = "serde")]
    {
        let file =
            std::fs::File::open(&path).with_context(|| format!("failed to open {path}"))?;
        ChordConfig::from_json(std::io::BufReader::new(file))
            .with_context(|| format!("failed to parse {path}"))
    }
    #[cfg(not(feature = "serde"))]
    {
        anyhow::bail!("cannot load {path}: built without the serde feature")
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    let synthesis = synthesize(&config).context("failed to synthesize chord")?;
    for (note, freq) in synthesis.notes.iter().zip(&synthesis.frequencies) {
        log::info!("{note}: {freq} Hz");
    }

    #[cfg(feature = "output")]
    DeviceOutput::with_default_device()?
        .play_blocking(&synthesis.combined, synthesis.sample_rate)
        .context("failed to play chord")?;

    let figures = vec![
        render::time_domain_figure(&synthesis),
        render::frequency_domain_figure(&synthesis, &config.captions),
    ];
    #[cfg(feature = "plot")]
    PlotWindow::default().render(figures)?;
    #[cfg(not(feature = "plot"))]
    for figure in &figures {
        log::info!(
            "{}: {} series, built without the plot feature",
            figure.title,
            figure.series.len()
        );
    }

    Ok(())
}
