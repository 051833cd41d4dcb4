use tracing::debug;
use ucp_frame::hex::hex_to_bytes;
use ucp_frame::FrameConfig;
use ucp_message::{Body, Message, SubmitShortMessage};

use crate::cmd::SubmitArgs;
use crate::exit::{message_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_message, OutputFormat};

pub fn run(args: SubmitArgs, format: OutputFormat) -> CliResult<i32> {
    let config = FrameConfig::default();
    let submit = build_submit(&args)?;
    let message = Message::operation(args.trn, args.operation.as_str(), Body::SubmitShortMessage(submit));

    let wire = message
        .encode(&config)
        .map_err(|err| message_error("compose failed", err))?;
    debug!(bytes = wire.len(), "composed submit");

    // Decode what was composed so the printed header carries the real length.
    let composed = Message::decode(&wire, &config).map_err(|err| message_error("compose failed", err))?;
    let checksum = checksum_of(&wire, &config);
    print_message(&composed, &checksum, &wire, format);
    Ok(SUCCESS)
}

fn build_submit(args: &SubmitArgs) -> CliResult<SubmitShortMessage> {
    match (&args.text, &args.hex) {
        (Some(text), None) => Ok(SubmitShortMessage::text(&args.recipient, &args.sender, text)),
        (None, Some(hex)) => {
            let payload = hex_to_bytes(hex)
                .map_err(|err| CliError::new(USAGE, format!("--hex is not valid hex: {err}")))?;
            Ok(SubmitShortMessage::binary(&args.recipient, &args.sender, &payload, ""))
        }
        _ => Err(CliError::new(USAGE, "one of --text or --hex is required")),
    }
}

fn checksum_of(wire: &[u8], config: &FrameConfig) -> String {
    let end = wire.len().saturating_sub(1);
    let start = end.saturating_sub(config.checksum_len);
    String::from_utf8_lossy(&wire[start..end]).into_owned()
}
