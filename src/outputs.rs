//! Output publication to the host environment.
//!
//! Outputs go to the sink file in `name<<DELIMITER` heredoc form when the
//! host supplies one, and to stdout as plain `name=value` lines otherwise.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::pipeline::RunOutputs;

/// Heredoc delimiter for multi-line values in the output sink.
const VALUE_DELIMITER: &str = "COMMIT_RELAY_EOF";

/// Publish run outputs to `sink`, or stdout when none is configured.
pub fn publish(outputs: &RunOutputs, sink: Option<&Path>) -> std::io::Result<()> {
    let rendered = render(outputs);

    match sink {
        Some(path) => {
            debug!(path = %path.display(), "Appending outputs to sink file");
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(rendered.as_bytes())?;
        }
        None => {
            print!("{rendered}");
        }
    }

    Ok(())
}

fn render(outputs: &RunOutputs) -> String {
    let mut buf = String::new();
    push_output(&mut buf, "summary", &outputs.summary);
    push_output(&mut buf, "response", &outputs.response);
    push_output(&mut buf, "status", &outputs.status.to_string());
    buf
}

fn push_output(buf: &mut String, name: &str, value: &str) {
    if value.contains('\n') {
        buf.push_str(name);
        buf.push_str("<<");
        buf.push_str(VALUE_DELIMITER);
        buf.push('\n');
        buf.push_str(value);
        buf.push('\n');
        buf.push_str(VALUE_DELIMITER);
        buf.push('\n');
    } else {
        buf.push_str(name);
        buf.push('=');
        buf.push_str(value);
        buf.push('\n');
    }
}
