// SPDX: CC0-1.0

use function_graph::{
    gnuplot::Plotter,
    paper::{Paper, Surface, Zoom},
    shell::{self, Command},
    Domain, Formula,
};
use std::{
    io::{stdout, BufWriter, Write},
    process::ExitCode,
    sync::Arc,
};
use tracing_subscriber::EnvFilter;

const PLACEHOLDER: &str = "x + 3";

fn main() -> ExitCode {
    init_logging();
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("unexpected error: {err}");
            let chain = err.chain();
            if chain.len() > 1 {
                eprintln!();
                eprintln!("context:");
                for it in chain.skip(1) {
                    eprintln!("  {it}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    // the shell owns stdout, so logs go to stderr and stay quiet by default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct State {
    expr: Option<Arc<String>>,
    formula: Option<Formula>,
    domain: Domain,
    paper: Paper,
    plotter: Plotter,
}

fn try_main() -> anyhow::Result<()> {
    let mut state = State {
        expr: None,
        formula: None,
        domain: Domain::default(),
        paper: Paper::new(),
        plotter: Plotter::new(Surface::default()),
    };
    tracing::debug!(domain = %state.domain, surface = %state.plotter.surface(), "starting");

    let mut stdout = BufWriter::new(stdout());
    writeln!(stdout, r#"Function Graph Tool, try "help" for help"#)?;
    writeln!(stdout)?;
    // show the empty graph right away
    state.paper.request_redraw();
    loop {
        if state.paper.take_redraw() {
            match state.plotter.draw(&state.paper) {
                Ok(out) => writeln!(stdout, "graph written to {}", out.svg.display())?,
                // the graph itself is fine, so keep the shell going
                Err(err) => {
                    tracing::error!(error = ?err, "drawing failed");
                    writeln!(stdout, "error: could not draw the graph: {err:#}")?;
                }
            }
            writeln!(stdout)?;
        }

        if let Some(ref expr) = state.expr {
            writeln!(stdout, "f(x) = {expr}  (zoom {})", state.paper.zoom())?;
        } else {
            writeln!(stdout, "f(x) is not set  (zoom {})", state.paper.zoom())?;
        }

        let mut try_cmd = shell::input(&mut stdout, "> ")?;
        try_cmd.make_ascii_lowercase();
        writeln!(stdout)?;

        if let Ok(cmd) = try_cmd.parse::<Command>() {
            match cmd {
                Command::Help => {
                    for c in Command::exhaustive() {
                        writeln!(stdout, "{name}: {help}", name = c.name(), help = c.help())?;
                    }
                }

                Command::Quit => break,

                Command::SetFormula => set_formula(&mut stdout, &mut state)?,

                Command::Zoom => set_zoom(&mut stdout, &mut state)?,

                Command::Plot => state.paper.request_redraw(),

                Command::PrintTerms => {
                    if let Some(ref formula) = state.formula {
                        shell::dump_terms(&mut stdout, formula, format_args!("terms"))?;
                    } else {
                        shell::formula_undefined(&mut stdout)?;
                    }
                }

                Command::PrintPoints => shell::dump_points(&mut stdout, state.paper.points(), 5)?,
            }
        } else if let Some(similar) = Command::suggest(&try_cmd) {
            writeln!(
                stdout,
                r#"Unknown command, did you mean "{}"? try "help" for help"#,
                similar.name()
            )?;
        } else {
            writeln!(stdout, r#"Unknown command, try "help" for help"#)?;
        }

        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

fn set_zoom<W: Write>(mut out: W, state: &mut State) -> anyhow::Result<()> {
    writeln!(out, "note: leave blank to skip")?;
    if let Ok(Some(zoom)) = shell::read_fromstr::<_, Zoom>(
        &mut out,
        format_args!(
            "?zoom, {min} to {max} (is {cur}) = ",
            min = Zoom::MIN,
            max = Zoom::MAX,
            cur = state.paper.zoom()
        ),
        true,
    )? {
        state.paper.set_zoom(zoom);
    }
    Ok(())
}

fn set_formula<W: Write>(mut out: W, state: &mut State) -> anyhow::Result<()> {
    writeln!(out, "example: {PLACEHOLDER}")?;
    let input = shell::input(&mut out, "f(x) = ")?;
    if input.is_empty() {
        return Ok(());
    }

    match state.paper.resolve(&input, &state.domain) {
        Ok(formula) => {
            writeln!(out, "evaluation ok")?;
            state.expr = Some(Arc::new(input));
            state.formula = Some(formula);
        }

        Err(err) => {
            tracing::warn!(input = %input, error = %err, "could not resolve formula");
            shell::formula_warning(&mut out, &err)?;
        }
    }

    Ok(())
}
