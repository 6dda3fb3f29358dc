//! Log output for the terminal: one line per event on stderr, prefixed with a
//! coloured status symbol. Listings go to stdout and stay clean.

use colored::*;
use tracing::{Event, Level, Subscriber, warn};
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

const VERBOSE_DIRECTIVES: &str =
    "info,narcotk_hosts=debug,narcotk_core=debug,narcotk_common=debug,narcotk_web=debug";

pub struct NarcotkFormatter;

impl<S, N> FormatEvent<S, N> for NarcotkFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Handle on the installed filter, so settings read after start-up can still
/// raise the level.
pub struct Logging {
    filter: Option<reload::Handle<EnvFilter, Registry>>,
}

impl Logging {
    /// Installs the global subscriber. `RUST_LOG` applies unless `verbose` is set.
    pub fn init(verbose: bool) -> Self {
        let (filter, handle) = reload::Layer::new(filter_for(verbose));

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .event_format(NarcotkFormatter)
                    .with_writer(std::io::stderr),
            )
            .try_init();

        Self {
            filter: installed.ok().map(|_| handle),
        }
    }

    pub fn set_verbose(&self) {
        let Some(handle) = &self.filter else {
            return;
        };
        if let Err(e) = handle.reload(filter_for(true)) {
            warn!("Cannot raise log level: {e}");
        }
    }
}

fn filter_for(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_DIRECTIVES);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
