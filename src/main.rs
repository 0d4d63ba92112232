use std::sync::Arc;

use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hp_express_client::cache::{CacheConfig, MemoryTokenCache, RedisTokenCache, TokenCache};
use hp_express_client::models::delivery_point::{filter_delivery_points, DeliveryPointQuery, FacilityType};
use hp_express_client::models::label::{decode_label, LabelFormat, LabelQuery};
use hp_express_client::services::tracking_url;
use hp_express_client::{CarrierError, Credentials, EnvironmentConfig, HpExpressClient, ReqwestTransport};

const USAGE: &str = "uso: hp-express <ping|token|points [ALL|PU|PAK] [búsqueda]|status <barcode>...|label <barcode> <archivo>|cancel <referencia>>";

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!(USAGE);
    };

    let config = EnvironmentConfig::from_env();
    let cache = build_cache(&config).await;
    let transport = ReqwestTransport::new().context("no se pudo crear el cliente HTTP")?;
    let client = HpExpressClient::new(Credentials::from_settings(&config), cache, Arc::new(transport));

    info!(
        "🚚 HP Express ({})",
        if client.is_test_mode() { "test" } else { "producción" }
    );

    if let Err(e) = run(&client, command, &args[1..]).await {
        match e.downcast_ref::<CarrierError>() {
            Some(carrier) => error!("❌ [{}] {}", carrier.code(), carrier),
            None => error!("❌ {:#}", e),
        }
        return Err(e);
    }

    Ok(())
}

async fn build_cache(config: &EnvironmentConfig) -> Arc<dyn TokenCache> {
    if let Some(url) = &config.redis_url {
        match RedisTokenCache::new(CacheConfig::new(url.clone())).await {
            Ok(redis) => return Arc::new(redis),
            Err(e) => warn!("⚠️ Redis no disponible ({}), usando cache en memoria", e),
        }
    }
    Arc::new(MemoryTokenCache::new())
}

async fn run(
    client: &HpExpressClient,
    command: &str,
    args: &[String],
) -> Result<()> {
    match command {
        "ping" => {
            println!("{}", client.ping().await?);
        }
        "token" => {
            client.clear_token().await;
            let token = client.get_token().await?;
            println!("token OK ({} caracteres)", token.len());
        }
        "points" => {
            let facility_type = args
                .first()
                .and_then(|t| FacilityType::from_code(t))
                .unwrap_or(FacilityType::ParcelLockers);
            let search = args.get(1).cloned().unwrap_or_default();

            let points = client
                .get_delivery_points(&DeliveryPointQuery {
                    facility_type,
                    ..Default::default()
                })
                .await?;

            for point in filter_delivery_points(&points, &search) {
                println!(
                    "{}\t{}\t{}, {} {}\t{:.5},{:.5}",
                    point.code, point.name, point.address, point.zip, point.city, point.lat, point.lng
                );
            }
        }
        "status" => {
            for (barcode, status) in args.iter().zip(client.get_shipment_status(args).await?) {
                match status.latest_scan() {
                    Some(scan) => println!("{}\t{}\t{}\t{}\t{}", barcode, scan.scan_time, scan.scan, scan.scan_description, scan.center),
                    None => println!("{}\t(sin escaneos)", barcode),
                }
                println!("\t{}", tracking_url(barcode));
            }
        }
        "label" => {
            let (Some(barcode), Some(path)) = (args.first(), args.get(1)) else {
                println!("{}", USAGE);
                return Ok(());
            };

            let response = client
                .get_shipping_labels(&LabelQuery::for_barcode(barcode.clone(), LabelFormat::PdfCode39))
                .await?;
            let encoded = response.into_label().map_err(|e| {
                warn!("⚠️ HP Express no devolvió etiqueta para {}", barcode);
                e
            })?;

            let bytes = decode_label(&encoded)?;
            std::fs::write(path, &bytes).with_context(|| format!("no se pudo escribir {}", path))?;
            info!("💾 Etiqueta guardada en {} ({} bytes)", path, bytes.len());
        }
        "cancel" => {
            let Some(reference) = args.first() else {
                println!("{}", USAGE);
                return Ok(());
            };
            client.cancel_shipment(reference).await?;
            println!("cancelada: {}", reference);
        }
        _ => println!("{}", USAGE),
    }

    Ok(())
}
