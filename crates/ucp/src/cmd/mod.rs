use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod checksum;
pub mod decode;
pub mod sender;
pub mod submit;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a frame, or every frame on stdin when none is given.
    Decode(DecodeArgs),
    /// Compose a submit short message (operation 51).
    Submit(SubmitArgs),
    /// Compute the checksum of a message.
    Checksum(ChecksumArgs),
    /// Encode or decode an originator address.
    Sender(SenderArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Submit(args) => submit::run(args, format),
        Command::Checksum(args) => checksum::run(args, format),
        Command::Sender(args) => sender::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame text. Delimiters may be written as `\x02`/`\x03`, `<STX>`/`<ETX>`, or left out.
    pub frame: Option<String>,
    /// Accept frames whose checksum does not match.
    #[arg(long)]
    pub no_verify_checksum: bool,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Transaction reference number (0-99).
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(0..=99))]
    pub trn: u32,
    /// Recipient address.
    #[arg(long)]
    pub recipient: String,
    /// Originator; alphanumeric senders are packed with OTOA 5039.
    #[arg(long)]
    pub sender: String,
    /// Message text.
    #[arg(long, conflicts_with = "hex")]
    pub text: Option<String>,
    /// Transparent data payload as hex.
    #[arg(long, conflicts_with = "text")]
    pub hex: Option<String>,
    /// Operation type.
    #[arg(long, default_value = "51", value_parser = ["51", "52", "53"])]
    pub operation: String,
}

#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// Message from the TRN through the separator before the checksum.
    pub message: String,
    /// Checksum to compare against; mismatch exits with status 60.
    #[arg(long)]
    pub expect: Option<String>,
}

#[derive(Args, Debug)]
pub struct SenderArgs {
    #[command(subcommand)]
    pub command: SenderCommand,
}

#[derive(Subcommand, Debug)]
pub enum SenderCommand {
    /// Encode a sender into OTOA and OAdC.
    Encode {
        /// Numeric or alphanumeric sender.
        text: String,
    },
    /// Decode an OAdC field.
    Decode {
        /// OTOA the field was sent with.
        #[arg(long, default_value = "5039")]
        otoa: String,
        /// Encoded OAdC.
        field: String,
    },
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
