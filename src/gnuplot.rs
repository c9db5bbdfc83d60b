// SPDX: CC0-1.0

use crate::paper::{Paper, Segment, Surface};
use anyhow::Context;
use chrono::{DateTime, Local};
#[cfg(not(debug_assertions))]
use std::process::Stdio;
use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::{self, Child},
};

const BACKGROUND: &str = "#e6e6e6";

/// Name of an output file. `seq` tells apart files written within the same
/// millisecond.
pub fn output_filename(now: DateTime<Local>, seq: u64, ext: &str) -> String {
    format!(
        "{}_output-{}-{seq}.{}",
        env!("CARGO_PKG_NAME"),
        now.format("%Y-%m-%d_%H-%M-%S%.3f"),
        ext
    )
}

/// One `x1 y1 x2 y2` row per segment.
pub fn write_data<W: Write>(mut out: W, segments: &[Segment]) -> io::Result<()> {
    for [a, b] in segments {
        writeln!(out, "{} {} {} {}", a.x, a.y, b.x, b.y)?;
    }
    Ok(())
}

/// Writes a script that renders `paper` to `svg_path`, then shows it on the
/// default terminal. Segments are read from `data_path`, in the format of
/// [`write_data`], and are already in surface coordinates.
pub fn write_script<W: Write>(
    mut out: W,
    paper: &Paper,
    surface: &Surface,
    data_path: &str,
    svg_path: &str,
) -> io::Result<()> {
    let Surface { width, height } = *surface;

    writeln!(out, "reset")?;
    writeln!(out, "set term push")?;
    writeln!(out, "set terminal svg size {width},{height}")?;
    writeln!(out, "set output '{svg_path}'")?;

    // the plot area is the whole surface, with y pointing down
    writeln!(out, "set margins 0,0,0,0")?;
    writeln!(out, "set xrange [0:{width}]")?;
    writeln!(out, "set yrange [{height}:0]")?;
    writeln!(out, "unset border")?;
    writeln!(out, "unset tics")?;
    writeln!(out, "unset key")?;

    writeln!(
        out,
        "set object 1 rectangle from screen 0,0 to screen 1,1 behind fillcolor rgb '{BACKGROUND}' fillstyle solid noborder"
    )?;
    for [a, b] in paper.axes(surface) {
        writeln!(
            out,
            "set arrow from {},{} to {},{} nohead dashtype 3 lc 'black'",
            a.x, a.y, b.x, b.y
        )?;
    }
    let pos = paper.label_pos(surface);
    writeln!(
        out,
        r#"set label "{label}" at {x},{y} font ",6" noenhanced"#,
        label = paper.label(),
        x = pos.x,
        y = pos.y,
    )?;

    if paper.points().len() < 2 {
        // gnuplot refuses to plot a file without data
        writeln!(out, "plot NaN notitle")?;
    } else {
        writeln!(out, r#"plot '{data_path}' \"#)?;
        writeln!(out, r#"  using 1:2:($3-$1):($4-$2) \"#)?;
        writeln!(out, r#"  with vectors nohead lc 'black' notitle"#)?;
    }

    // display window
    writeln!(out, "set term pop")?;
    writeln!(out, "replot")?;
    Ok(())
}

fn create_new(path: &Path) -> io::Result<BufWriter<File>> {
    Ok(BufWriter::new(
        OpenOptions::new().write(true).create_new(true).open(path)?,
    ))
}

fn finish(mut file: BufWriter<File>) -> io::Result<()> {
    file.flush()?;
    file.get_mut().sync_data()
}

/// Files written for one drawing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    pub data: PathBuf,
    pub script: PathBuf,
    pub svg: PathBuf,
}

/// Draws a [`Paper`] through a gnuplot child process. Only the most recent
/// child is kept alive.
#[derive(Debug)]
pub struct Plotter {
    surface: Surface,
    dir: PathBuf,
    seq: u64,
    gnuplot: Option<Child>,
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new(Surface::default())
    }
}

impl Plotter {
    /// Output files go to the working directory.
    pub fn new(surface: Surface) -> Self {
        Self::with_dir(surface, ".")
    }

    pub fn with_dir(surface: Surface, dir: impl Into<PathBuf>) -> Self {
        Self {
            surface,
            dir: dir.into(),
            seq: 0,
            gnuplot: None,
        }
    }

    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Writes the data file and the script for `paper`. Every call gets new
    /// file names, however close together the calls are.
    pub fn write(&mut self, paper: &Paper) -> anyhow::Result<Output> {
        let now = Local::now();
        let seq = self.seq;
        self.seq += 1;
        let out = Output {
            data: self.dir.join(output_filename(now, seq, "data")),
            script: self.dir.join(output_filename(now, seq, "gnuplot")),
            svg: self.dir.join(output_filename(now, seq, "svg")),
        };

        let mut data = create_new(&out.data).context("failed to open output data file")?;
        write_data(&mut data, &paper.segments(&self.surface))
            .and_then(|()| finish(data))
            .context("failed to write to output data file")?;

        let mut script =
            create_new(&out.script).context("failed to open output gnuplot file")?;
        write_script(
            &mut script,
            paper,
            &self.surface,
            &out.data.display().to_string(),
            &out.svg.display().to_string(),
        )
        .and_then(|()| finish(script))
        .context("failed to write to output gnuplot file")?;

        Ok(out)
    }

    /// Renders `paper` and opens it in gnuplot. The previous window is only
    /// closed once the new one is up, so a failure leaves it on screen.
    pub fn draw(&mut self, paper: &Paper) -> anyhow::Result<Output> {
        let out = self.write(paper)?;

        // spawn gnuplot and provide the path to the file
        let mut cmd = process::Command::new("gnuplot");
        cmd.arg("--persist").arg(&out.script);
        #[cfg(not(debug_assertions))]
        {
            cmd.stdout(Stdio::null())
                .stderr(Stdio::null())
                .stdin(Stdio::null());
        }
        let child = cmd
            .spawn()
            .context("failed to spawn gnuplot (is it installed and in ${PATH}?)")?;
        tracing::info!(
            pid = child.id(),
            script = %out.script.display(),
            svg = %out.svg.display(),
            zoom = %paper.zoom(),
            "spawned gnuplot"
        );

        if let Some(mut old_child) = self.gnuplot.replace(child) {
            old_child
                .kill()
                .context("failed to kill previous gnuplot child")?;
            old_child
                .wait()
                .context("failed to wait for previous gnuplot child")?;
        }
        Ok(out)
    }
}
