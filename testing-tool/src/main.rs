use anyhow::Result;
use colored::*;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚚 Freight Dispatch Smoke Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    // Paso 1: Pedir destino y sesión
    let session = get_session()?;
    let client = Client::new();

    // Paso 2: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 💚 Health check");
        println!("2. 📦 Listar órdenes");
        println!("3. 📋 Listar manifiestos activos");
        println!("4. 🛰️ Posiciones de la flota");
        println!("5. 💵 Vista previa de pago");
        println!("6. 🔒 Probar sesión (PUT sin cambios)");
        println!("7. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-7): ".bright_yellow());
        io::stdout().flush()?;

        let choice = read_line()?;

        let result = match choice.as_str() {
            "1" => call(&client, &session, Method::GET, "/health", None).await,
            "2" => call(&client, &session, Method::GET, "/api/orders", None).await,
            "3" => {
                call(&client, &session, Method::GET, "/api/manifests?status=in_progress", None).await
            }
            "4" => call(&client, &session, Method::GET, "/api/fleet/vehicles", None).await,
            "5" => payment_preview(&client, &session).await,
            "6" => {
                let id = prompt("ID de manifiesto: ")?;
                call(
                    &client,
                    &session,
                    Method::PUT,
                    &format!("/api/manifests/{}", id),
                    Some(json!({})),
                )
                .await
            }
            "7" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = result {
            println!("{}", format!("❌ Error: {}", e).bright_red());
        }
    }

    Ok(())
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    read_line()
}

fn get_session() -> Result<Session> {
    println!("{}", "🔐 CONEXIÓN".bright_cyan().bold());
    println!("{}", "===========".bright_cyan());

    let mut base_url = prompt("URL base (http://localhost:3000): ")?;
    if base_url.is_empty() {
        base_url = "http://localhost:3000".to_string();
    }

    let token = prompt("Token de sesión (vacío para solo lectura): ")?;

    Ok(Session {
        base_url: base_url.trim_end_matches('/').to_string(),
        token: if token.is_empty() { None } else { Some(token) },
    })
}

async fn payment_preview(client: &Client, session: &Session) -> Result<()> {
    let payment_type = prompt("Tipo de pago (hourly/mileage): ")?;
    let rate = prompt("Tarifa: ")?;
    let duration = prompt("Duración (ej: 2 hours 30 minutes): ")?;
    let distance = prompt("Distancia (ej: 120 miles): ")?;

    let payload = json!({
        "driver_payment_type": payment_type,
        "driver_rate": rate,
        "duration": duration,
        "distance": distance,
    });

    call(client, session, Method::POST, "/api/payments/preview", Some(payload)).await
}

async fn call(
    client: &Client,
    session: &Session,
    method: Method,
    path: &str,
    payload: Option<Value>,
) -> Result<()> {
    let url = format!("{}{}", session.base_url, path);

    println!();
    println!("{}", format!("📤 {} {}", method, url).bright_blue());

    let mut request = client.request(method, &url);
    if let Some(token) = &session.token {
        request = request.bearer_auth(token);
    }
    if let Some(payload) = &payload {
        println!("{}", "📦 Payload:".bright_blue());
        println!("{}", serde_json::to_string_pretty(payload)?);
        request = request.json(payload);
    }

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    let status_line = format!("📥 Status: {}", status);
    if status.is_success() {
        println!("{}", status_line.bright_green().bold());
    } else {
        println!("{}", status_line.bright_red().bold());
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(value) => {
            if let Some(items) = value.as_array() {
                println!("{}", format!("📄 {} elementos", items.len()).bright_green());
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Err(_) => println!("{}", body),
    }

    Ok(())
}

#[derive(Debug)]
struct Session {
    base_url: String,
    token: Option<String>,
}
