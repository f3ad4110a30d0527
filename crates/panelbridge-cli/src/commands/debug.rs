//! Verbose single-call diagnostic: one verifyConn exchange with the raw
//! request URL, raw response body and the interpreted outcome.

use crate::error::CliResult;
use crate::utils::ColoredOutput;
use panelbridge_client::{
    api_url, ApiClient, ApiOutcome, ClientError, Endpoint, PanelConnection, PanelResponse,
    VerifyConnRequest, VerifyConnResponse,
};
use serde_json::Value;

pub struct DebugCommand;

impl DebugCommand {
    pub async fn run(conn: PanelConnection) -> CliResult<()> {
        println!("=== CyberPanel API Debug ===\n");
        println!("Target URL: {}", ColoredOutput::highlight(&api_url(&conn, Endpoint::VerifyConn)?));
        println!(
            "TLS: {}, certificate verification: {}\n",
            if conn.use_tls { "on" } else { "off" },
            if conn.verify_certs { "on" } else { "off (default)" },
        );

        let client = ApiClient::new();
        let request = VerifyConnRequest::from_connection(&conn);
        let payload = serde_json::to_value(&request)
            .map_err(|e| ClientError::InvalidConfig { message: e.to_string() })?;

        println!("Calling verifyConn...");
        let raw = match client.call(&conn, Endpoint::VerifyConn, &payload).await {
            Ok(raw) => raw,
            Err(e) => {
                Self::explain_failure(&e);
                return Err(e.into());
            }
        };

        println!("Raw response:");
        println!("{}\n", serde_json::to_string_pretty(&raw).unwrap_or_else(|_| raw.to_string()));

        let response: VerifyConnResponse = serde_json::from_value(raw.clone())
            .map_err(|e| ClientError::Parse { message: e.to_string() })?;
        match response.outcome() {
            ApiOutcome::Accepted => {
                println!("{} API connection verified successfully", ColoredOutput::success("OK"));
            }
            ApiOutcome::Rejected { message } => {
                println!("{} API returned verifyConn = false", ColoredOutput::error("FAIL"));
                println!(
                    "Error message: {}",
                    message.as_deref().unwrap_or("No error message")
                );
            }
            ApiOutcome::UnrecognizedShape => {
                println!(
                    "{} No '{}' field in response",
                    ColoredOutput::error("FAIL"),
                    VerifyConnResponse::flag_field()
                );
                if let Value::Object(map) = &raw {
                    let fields: Vec<&str> = map.keys().map(String::as_str).collect();
                    println!("Available fields: {}", fields.join(", "));
                }
            }
        }

        println!("\n=== Debug complete ===");
        Ok(())
    }

    fn explain_failure(err: &ClientError) {
        match err {
            ClientError::Transport { message } => {
                println!("{} Transport failure (after retries): {}", ColoredOutput::error("FAIL"), message);
                println!("Check host, port, firewall rules and that the panel is running.");
            }
            ClientError::HttpStatus { code } => {
                println!("{} Unexpected HTTP status {}", ColoredOutput::error("FAIL"), code);
                println!("The panel answered but not with 200; a redirect or proxy may be in the way.");
            }
            ClientError::Parse { message } => {
                println!("{} Response was not valid JSON: {}", ColoredOutput::error("FAIL"), message);
                println!("The URL may point at the panel's web UI instead of the API.");
            }
            ClientError::InvalidConfig { message } => {
                println!("{} Invalid connection parameters: {}", ColoredOutput::error("FAIL"), message);
            }
        }
    }
}
