use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use anyhow::Result;
use checkfns::fns::{ApiConfig, HttpTransport, Transport};
use checkfns::{VerifyError, verify_receipt};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

/// Command line arguments for checkfns.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check a fiscal receipt QR code with the FNS service and print the receipt JSON",
    after_help = "Environment: CHECKFNS_APILOGIN, CHECKFNS_APIPWD, CHECKFNS_DEBUG"
)]
struct Args {
    /// Raw QR content, e.g. "t=20190418T211655&s=3943.26&fn=9282000100072197&i=64318&fp=2918241905&n=1"
    qr: Option<String>,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("checkfns=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Verify `qr` and write the receipt body to `out` unmodified.
fn run<T, W>(qr: &str, config: &ApiConfig, transport: &T, out: &mut W) -> Result<()>
where
    T: Transport + ?Sized,
    W: Write,
{
    let receipt = verify_receipt(qr, config, transport)?;
    out.write_all(&receipt)?;
    out.flush()?;
    Ok(())
}

/// Service failures are logged where they happen; everything else is logged here.
fn already_logged(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<VerifyError>(), Some(VerifyError::Fns(_)))
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = ApiConfig::from_env();
    init_logging(config.debug);

    let result = HttpTransport::new().map_err(anyhow::Error::from).and_then(|transport| {
        let qr = args.qr.as_deref().unwrap_or_default();
        run(qr, &config, &transport, &mut std::io::stdout().lock())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !already_logged(&e) {
                error!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkfns::fns::FnsError;
    use std::io::{Read, Write as _};
    use std::net::TcpListener;
    use std::thread;

    const SAMPLE: &str =
        "t=20190418T211655&s=3943.26&fn=9282000100072197&i=64318&fp=2918241905&n=1";

    /// Answer the existence check with 204 and the contents request with `body`.
    fn serve_receipt(listener: TcpListener, body: &'static [u8]) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            let mut contents = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .into_bytes();
            contents.extend_from_slice(body);
            let responses = [
                b"HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_vec(),
                contents,
            ];
            for resp in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut chunk).unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&chunk[..n]);
                }
                stream.write_all(&resp).unwrap();
            }
        })
    }

    fn transport() -> HttpTransport {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .unwrap();
        HttpTransport::from_client(client)
    }

    #[test]
    fn writes_body_byte_for_byte() {
        const BODY: &[u8] = b"{\"document\":{\"receipt\":{\"totalSum\":394326}}}";
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let config = ApiConfig::new("user", "pw")
            .with_base_url(format!("http://{}", listener.local_addr().unwrap()));
        let server = serve_receipt(listener, BODY);

        let mut out = Vec::new();
        run(SAMPLE, &config, &transport(), &mut out).unwrap();
        server.join().unwrap();

        assert_eq!(out, BODY);
    }

    #[test]
    fn nothing_written_on_failure() {
        let mut out = Vec::new();
        let config = ApiConfig::new("", "");
        assert!(run("", &config, &transport(), &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn service_errors_not_logged_twice() {
        let fns = anyhow::Error::from(VerifyError::Fns(FnsError::UnexpectedStatus {
            expected: 204,
            actual: 406,
        }));
        assert!(already_logged(&fns));
        assert!(!already_logged(&anyhow::Error::from(VerifyError::EmptyInput)));
        assert!(!already_logged(&anyhow::anyhow!("broken pipe")));
    }
}
