use ucp_message::{decode_sender, encode_sender};

use crate::cmd::{SenderArgs, SenderCommand};
use crate::exit::{message_error, CliResult, SUCCESS};
use crate::output::{print_values, OutputFormat};

pub fn run(args: SenderArgs, format: OutputFormat) -> CliResult<i32> {
    match args.command {
        SenderCommand::Encode { text } => {
            let (otoa, oadc) = encode_sender(&text);
            print_values(&[("otoa", otoa.as_str()), ("oadc", oadc.as_str())], oadc.as_bytes(), format);
        }
        SenderCommand::Decode { otoa, field } => {
            let sender =
                decode_sender(&otoa, &field).map_err(|err| message_error("decode failed", err))?;
            print_values(&[("otoa", otoa.as_str()), ("sender", sender.as_str())], sender.as_bytes(), format);
        }
    }
    Ok(SUCCESS)
}
