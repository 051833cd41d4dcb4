use std::io::Read;

use tracing::{info, warn};
use ucp_frame::{decode_frame, wrap, FrameConfig, FrameError, FrameReader, RawFrame};
use ucp_message::Message;

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, message_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_message, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = FrameConfig {
        verify_checksum: !args.no_verify_checksum,
        ..FrameConfig::default()
    };

    match &args.frame {
        Some(text) => {
            let wire = frame_bytes(text, &config)?;
            let frame = decode_frame(&wire, &config).map_err(|err| frame_error("decode failed", err))?;
            print_frame(frame, &wire, &config, format)
                .map_err(|err| message_error("decode failed", err))?;
            Ok(SUCCESS)
        }
        None => decode_stream(std::io::stdin().lock(), config, format),
    }
}

/// Turn command-line text into one delimited frame.
fn frame_bytes(text: &str, config: &FrameConfig) -> CliResult<Vec<u8>> {
    let stx = (config.stx as char).to_string();
    let etx = (config.etx as char).to_string();
    let text = text
        .trim()
        .replace("\\x02", &stx)
        .replace("<STX>", &stx)
        .replace("\\x03", &etx)
        .replace("<ETX>", &etx);
    let message = text
        .strip_prefix(stx.as_str())
        .unwrap_or(&text);
    let message = message.strip_suffix(etx.as_str()).unwrap_or(message);

    wrap(message, config)
        .map(|wire| wire.to_vec())
        .map_err(|err| CliError::new(USAGE, format!("invalid frame text: {err}")))
}

fn print_frame(
    frame: RawFrame,
    wire: &[u8],
    config: &FrameConfig,
    format: OutputFormat,
) -> ucp_message::Result<()> {
    let checksum = frame.checksum.clone();
    let message = Message::from_frame(frame, config.separator)?;
    print_message(&message, &checksum, wire, format);
    Ok(())
}

/// Decode every frame in `input`, skipping (and counting) malformed ones.
fn decode_stream<R: Read>(input: R, config: FrameConfig, format: OutputFormat) -> CliResult<i32> {
    let mut reader = FrameReader::with_config(input, config.clone());
    let mut decoded = 0usize;
    let mut rejected = 0usize;

    loop {
        let wire = match reader.read_wire() {
            Ok(wire) => wire,
            Err(FrameError::ConnectionClosed) => break,
            Err(FrameError::Io(err)) => return Err(crate::exit::io_error("read failed", err)),
            Err(err) => {
                warn!(error = %err, "skipping malformed frame");
                rejected += 1;
                continue;
            }
        };
        let frame = match decode_frame(&wire, &config) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(error = %err, "skipping malformed frame");
                rejected += 1;
                continue;
            }
        };

        match print_frame(frame, &wire, &config, format) {
            Ok(()) => decoded += 1,
            Err(err) => {
                warn!(error = %err, nack = %err.nack_code().code(), "skipping undecodable body");
                rejected += 1;
            }
        }
    }

    info!(decoded, rejected, "end of input");
    if rejected > 0 {
        return Err(CliError::new(
            DATA_INVALID,
            format!("{rejected} of {} frames rejected", decoded + rejected),
        ));
    }
    Ok(SUCCESS)
}
