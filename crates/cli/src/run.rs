//! One encrypt or decrypt pass from an input reader to an output writer.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use codec::{Codec, CodecError};
use common::protocol::{ErrorResponse, SealedPayload};
use tracing::info;

use crate::config::{Config, OutputFormat};

/// The operation named by the first command-line argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
        })
    }
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "encrypt" => Ok(Operation::Encrypt),
            "decrypt" => Ok(Operation::Decrypt),
            other => anyhow::bail!("unknown operation {other:?}; expected encrypt or decrypt"),
        }
    }
}

/// Run `op` over everything readable from `input`, writing the result to `output`.
///
/// Encrypt reads raw bytes and writes base64 text or a JSON [`SealedPayload`],
/// per [`Config::output_format`]. Decrypt accepts either form and writes raw
/// plaintext; a JSON payload carries its own mode and padding.
pub fn execute<R: Read, W: Write>(cfg: &Config, op: Operation, mut input: R, mut output: W) -> Result<()> {
    match op {
        Operation::Encrypt => {
            let mut plaintext = Vec::new();
            input.read_to_end(&mut plaintext).context("failed to read plaintext")?;
            encrypt(cfg, &plaintext, &mut output)?;
        }
        Operation::Decrypt => {
            let mut text = String::new();
            input
                .read_to_string(&mut text)
                .context("ciphertext input must be base64 or JSON text")?;
            let plaintext = decrypt(cfg, text.trim())?;
            output.write_all(&plaintext).context("failed to write plaintext")?;
        }
    }
    output.flush().context("failed to flush output")
}

fn encrypt<W: Write>(cfg: &Config, plaintext: &[u8], output: &mut W) -> Result<()> {
    let codec = cfg.codec();
    let iv = cfg.iv_bytes();
    let ciphertext = codec.encrypt(plaintext, cfg.key_bytes(), iv)?;
    let payload = STANDARD.encode(&ciphertext);

    match cfg.output_format {
        OutputFormat::Base64 => writeln!(output, "{payload}")?,
        OutputFormat::Json => {
            let sealed = SealedPayload {
                mode: codec.mode(),
                padding: codec.padding(),
                salted: codec.writes_header(iv),
                payload,
            };
            serde_json::to_writer(&mut *output, &sealed).context("failed to write sealed payload")?;
            writeln!(output)?;
        }
    }

    info!(
        operation = "encrypt",
        mode = %codec.mode(),
        salted = codec.writes_header(iv),
        ciphertext_len = ciphertext.len(),
        "operation complete"
    );
    Ok(())
}

fn decrypt(cfg: &Config, text: &str) -> Result<Vec<u8>> {
    let (codec, payload, iv) = if text.starts_with('{') {
        let sealed: SealedPayload = serde_json::from_str(text).context("malformed sealed payload")?;
        let codec = Codec::new(sealed.mode, sealed.padding).with_kdf_digest(cfg.kdf_digest);
        let iv = if sealed.salted { None } else { cfg.iv_bytes() };
        (codec, sealed.payload, iv)
    } else {
        (cfg.codec(), text.to_owned(), cfg.iv_bytes())
    };

    let ciphertext = STANDARD
        .decode(payload.as_bytes())
        .context("ciphertext is not valid base64")?;
    let plaintext = codec.decrypt(&ciphertext, cfg.key_bytes(), iv)?;

    info!(
        operation = "decrypt",
        mode = %codec.mode(),
        salted = codec.writes_header(iv),
        plaintext_len = plaintext.len(),
        "operation complete"
    );
    Ok(plaintext)
}

/// Map any failure to the JSON error body written on stderr.
pub fn error_response(err: &anyhow::Error) -> ErrorResponse {
    match err.chain().find_map(|cause| cause.downcast_ref::<CodecError>()) {
        Some(codec_err) => ErrorResponse::from(codec_err),
        None => ErrorResponse::new("invalid_input", format!("{err:#}")),
    }
}
