//! # Configurator Walkthrough
//!
//! Drives a full configure → quote → scene → save → share session against a
//! local SQLite store, printing each step.
//!
//! ## Usage
//! ```bash
//! # Default database path (./heartwood_dev.db)
//! cargo run -p heartwood-configurator --bin demo
//!
//! # Specify database path
//! cargo run -p heartwood-configurator --bin demo -- --db ./data/heartwood.db
//!
//! # Pick a wood by catalog key
//! cargo run -p heartwood-configurator --bin demo -- --wood ebony
//! ```

use std::env;
use std::sync::Arc;

use heartwood_configurator::ConfiguratorSession;
use heartwood_core::{
    CarvingStyle, CarvingTechnique, ConfigurationUpdate, Dimensions, WoodType,
};
use heartwood_store::{Store, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./heartwood_dev.db");
    let mut wood = WoodType::Walnut;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--wood" | "-w" => {
                if i + 1 < args.len() {
                    wood = WoodType::from_key(&args[i + 1])?;
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Heartwood Configurator Walkthrough");
                println!();
                println!("Usage: demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./heartwood_dev.db)");
                println!("  -w, --wood <KEY>   Wood catalog key (default: walnut)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🪵 Heartwood Configurator Walkthrough");
    println!("=====================================");
    println!("Database: {}", db_path);
    println!("Wood:     {}", wood.display_name());
    println!();

    // Connect the snapshot store
    let store = Store::new(StoreConfig::new(&db_path)).await?;
    println!("✓ Connected to snapshot store");
    println!("✓ Migrations applied");

    let session = ConfiguratorSession::with_store(Arc::new(store.snapshots()));
    session.on_config_change(|config, price| {
        println!(
            "  ↳ onConfigChange: {} / {} → {}",
            config.product_type.display_name(),
            config.wood_type.display_name(),
            price
        );
    });

    // Step through the published worked example, then add carving
    println!();
    println!("Configuring...");
    session.update(&ConfigurationUpdate {
        wood_type: Some(wood),
        dimensions: Some(Dimensions::new(1.2, 2.0, 1.0)),
        ..Default::default()
    });

    session.update(&ConfigurationUpdate {
        carving_technique: Some(CarvingTechnique::Relief),
        carving_style: Some(CarvingStyle::Floral),
        carving_depth: Some(4),
        carving_detail: Some(5),
        ..Default::default()
    });

    let quote = session.quote();
    println!();
    println!("Quote breakdown:");
    println!("  base        {}", quote.base_price);
    println!("  material    {:.2}", quote.material_cost);
    println!("  finish      {:.2}", quote.finish_cost);
    println!("  carving     {:.2}", quote.carving_cost);
    println!("  subtotal    {:.2}", quote.subtotal);
    println!("  discount    {:.2}", quote.discount_amount);
    println!("  TOTAL       {}", quote.total);
    println!("  est. hours  {:.1}", session.estimated_hours());

    // Scene derivation is memoized; the second call is a cache hit
    let scene = session.scene();
    let _ = session.scene();
    println!();
    println!(
        "Scene: {:?} mesh, grain '{}', {} rebuild(s)",
        scene.mesh,
        scene.grain.figure,
        session.scene_rebuild_count()
    );

    // Save, list, share
    let saved = session.save_snapshot("Floral relief chair").await?;
    println!();
    println!("✓ Saved snapshot '{}' ({})", saved.name, saved.id);

    let all = session.list_snapshots().await?;
    println!("  Store now holds {} snapshot(s)", all.len());

    let url = session.share_url("https://heartwood.example/commission");
    println!();
    println!("Share link ({} chars):", url.len());
    println!("  {}", url);

    let request = session.submit_commission();
    println!();
    println!("✓ Commission request {} ready: {}", request.reference, request.price);

    Ok(())
}
