use ucp_frame::checksum::{checksum, matches};

use crate::cmd::ChecksumArgs;
use crate::exit::{CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_values, OutputFormat};

pub fn run(args: ChecksumArgs, format: OutputFormat) -> CliResult<i32> {
    if args.message.chars().any(|ch| u32::from(ch) > 0xFF) {
        return Err(CliError::new(
            USAGE,
            "message contains characters outside the single-byte range",
        ));
    }
    let sum = checksum(&args.message);

    if let Some(expected) = &args.expect {
        if !matches(&args.message, expected) {
            return Err(CliError::new(
                DATA_INVALID,
                format!("checksum mismatch: computed {sum}, expected {expected}"),
            ));
        }
    }

    print_values(&[("message", args.message.as_str()), ("checksum", sum.as_str())], sum.as_bytes(), format);
    Ok(SUCCESS)
}
