use reqwest::Response;
use serde_json::Value;

/// Print the status line, then the body as pretty JSON when it parses
pub async fn print_response(response: Response) -> anyhow::Result<()> {
    println!("Status Code: {}", response.status().as_u16());

    let text = response.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("Response: {}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("Response: {}", text),
    }
    Ok(())
}
