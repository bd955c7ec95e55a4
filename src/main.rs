use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
    process,
};

use fencemark::{
    Renderer,
    config::{self, Command, RenderArgs, Settings},
    error::AppError,
    telemetry, themes,
};
use tracing::{Dispatch, Level, debug, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

const STDIO_PATH: &str = "-";

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let config::CliArgs {
        render, command, ..
    } = cli_args;

    match command.unwrap_or(Command::Render(render)) {
        Command::Render(args) => run_render(&settings, &args),
        Command::Themes => run_themes(),
        Command::Css(_) => run_css(&settings),
    }
}

fn run_render(settings: &Settings, args: &RenderArgs) -> Result<(), AppError> {
    let markdown = read_input(args.input.as_deref())?;
    let renderer = Renderer::new(settings.render.renderer_options());

    debug!(
        theme = %settings.render.theme_name,
        input_bytes = markdown.len(),
        "rendering document"
    );
    let html = renderer.render(&markdown);

    write_output(args.output.as_deref(), &html)?;
    info!(
        theme = %settings.render.theme_name,
        output_bytes = html.len(),
        "document rendered"
    );
    Ok(())
}

fn run_themes() -> Result<(), AppError> {
    let mut listing = String::new();
    for name in themes::registry().names() {
        listing.push_str(name);
        listing.push('\n');
    }
    write_output(None, &listing)
}

/// `css --theme` is folded into the render settings while loading configuration.
fn run_css(settings: &Settings) -> Result<(), AppError> {
    let renderer = Renderer::new(settings.render.renderer_options());
    let mut css = renderer.stylesheet().to_string();
    css.push('\n');
    write_output(None, &css)
}

fn read_input(path: Option<&Path>) -> Result<String, AppError> {
    match path.filter(|path| *path != Path::new(STDIO_PATH)) {
        Some(path) => {
            fs::read_to_string(path).map_err(|err| AppError::read(path.display().to_string(), err))
        }
        None => {
            let mut markdown = String::new();
            io::stdin()
                .read_to_string(&mut markdown)
                .map_err(|err| AppError::read("<stdin>", err))?;
            Ok(markdown)
        }
    }
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), AppError> {
    match path.filter(|path| *path != Path::new(STDIO_PATH)) {
        Some(path) => {
            fs::write(path, contents).map_err(|err| AppError::write(path.display().to_string(), err))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|err| AppError::write("<stdout>", err))
        }
    }
}
