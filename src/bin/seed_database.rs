//! FreeGenes database seeder
//!
//! Fills a running API with a small, realistic inventory: a container
//! hierarchy, coding parts, plates with samples in their wells, platesets,
//! distributions and an MTA. A vendor platemap CSV can be imported as well.
//!
//! Usage:
//!   `cargo run --bin seed_database -- --url http://localhost:3000/api`
//!   `cargo run --bin seed_database -- --url http://localhost:3000/api --platemap twist.csv`

use anyhow::{Context, Result, anyhow, bail};
use clap::{Arg, Command};
use console::style;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Method};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::Duration;

const STEPS: usize = 6;
const MAX_CONCURRENT: usize = 8;

#[derive(Debug, Clone)]
pub struct SeedingConfig {
    pub base_url: String,
    pub client: Client,
}

#[derive(Debug, Default)]
pub struct CreatedObjects {
    pub root_id: Option<String>,
    pub freezer_ids: Vec<String>,
    pub parts: Vec<Value>,
    pub plates: Vec<Value>,
    pub samples: Vec<Value>,
    pub platesets: Vec<Value>,
    pub distributions: Vec<Value>,
    pub mta: Option<Value>,
}

pub struct DatabaseSeeder {
    config: SeedingConfig,
    created_objects: CreatedObjects,
}

/// Ids are returned by every create endpoint
fn id_of(value: &Value) -> Result<String> {
    value["id"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("response has no id: {value}"))
}

fn step(n: usize, message: &str) {
    println!(
        "{} {message}",
        style(format!("[{n}/{STEPS}]")).bold().dim()
    );
}

fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} {msg}",
            )?
            .progress_chars("##-"),
    );
    Ok(pb)
}

impl DatabaseSeeder {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            config: SeedingConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                client,
            },
            created_objects: CreatedObjects::default(),
        })
    }

    async fn send(config: &SeedingConfig, method: Method, endpoint: &str, data: Option<Value>) -> Result<Value> {
        let url = format!("{}{endpoint}", config.base_url);
        let mut request = config.client.request(method, &url);
        if let Some(body) = data {
            request = request.json(&body);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("request to {endpoint} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("HTTP {status} {endpoint}: {error_text}");
        }
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        Ok(response.json::<Value>().await?)
    }

    async fn make_request(&self, method: Method, endpoint: &str, data: Option<Value>) -> Result<Value> {
        Self::send(&self.config, method, endpoint, data).await
    }

    /// POSTs every payload to `endpoint` with bounded concurrency
    async fn make_parallel_posts(
        &self,
        endpoint: &str,
        payloads: Vec<Value>,
        pb: &ProgressBar,
    ) -> Result<Vec<Value>> {
        let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT));
        let mut tasks = Vec::new();

        for payload in payloads {
            let sem = Arc::clone(&semaphore);
            let config = self.config.clone();
            let endpoint = endpoint.to_string();
            let pb = pb.clone();

            tasks.push(tokio::spawn(async move {
                let _permit = sem.acquire().await?;
                let result = Self::send(&config, Method::POST, &endpoint, Some(payload)).await;
                pb.inc(1);
                result
            }));
        }

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.map_err(|e| anyhow!("task join error: {e}"))?)
            .collect()
    }

    pub async fn test_connection(&self) -> Result<()> {
        let health_url = self
            .config
            .base_url
            .trim_end_matches("/api")
            .to_string();
        let response = self
            .config
            .client
            .get(format!("{health_url}/healthz"))
            .send()
            .await
            .context("API is not reachable")?;
        if !response.status().is_success() {
            bail!("health check returned {}", response.status());
        }
        Ok(())
    }

    pub async fn create_containers(&mut self) -> Result<()> {
        step(1, "Creating the container hierarchy...");

        let existing = self
            .make_request(Method::GET, "/containers/tree", None)
            .await
            .ok();
        let root_id = match existing {
            Some(tree) => id_of(&tree)?,
            None => {
                let root = self
                    .make_request(
                        Method::POST,
                        "/containers",
                        Some(json!({
                            "name": "freegenes-lab",
                            "container_type": "lab",
                            "description": "FreeGenes lab"
                        })),
                    )
                    .await?;
                id_of(&root)?
            }
        };

        let room = self
            .make_request(
                Method::POST,
                "/containers",
                Some(json!({
                    "name": format!("room-{}", &uuid::Uuid::new_v4().simple().to_string()[..6]),
                    "container_type": "room",
                    "description": "Cold room",
                    "parent_id": root_id
                })),
            )
            .await?;
        let room_id = id_of(&room)?;

        for (name, temperature) in [("freezer-minus80", -80.0), ("fridge-4c", 4.0)] {
            let container_type = if temperature < 0.0 { "freezer" } else { "fridge" };
            let container = self
                .make_request(
                    Method::POST,
                    "/containers",
                    Some(json!({
                        "name": name,
                        "container_type": container_type,
                        "description": format!("{name} in the cold room"),
                        "estimated_temperature": temperature,
                        "parent_id": room_id
                    })),
                )
                .await?;
            self.created_objects.freezer_ids.push(id_of(&container)?);
        }

        self.created_objects.root_id = Some(root_id);
        println!(
            "{} Created {} containers",
            style("✅").green(),
            self.created_objects.freezer_ids.len() + 1
        );
        Ok(())
    }

    pub async fn create_parts(&mut self, count: usize) -> Result<()> {
        step(2, "Creating coding parts...");

        let batch = &uuid::Uuid::new_v4().simple().to_string()[..4];
        let payloads: Vec<Value> = (1..=count)
            .map(|n| {
                json!({
                    "name": format!("Seed part {batch}-{n}"),
                    "gene_id": format!("BBF10K_{batch}{n:04}"),
                    "part_type": "cds",
                    "description": "Synthetic coding sequence",
                    "original_sequence": "ATGAAAGCAATTTTCGTACTGAAAGGTTGGTGGCGCACTTCCTGA"
                })
            })
            .collect();

        let pb = progress_bar(payloads.len())?;
        self.created_objects.parts = self.make_parallel_posts("/parts", payloads, &pb).await?;
        pb.finish_with_message("Parts created!");
        Ok(())
    }

    pub async fn create_plates_with_samples(&mut self, plates: usize) -> Result<()> {
        step(3, "Creating plates and filling wells with samples...");

        let freezer_id = self
            .created_objects
            .freezer_ids
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("containers must be created first"))?;

        let pb = progress_bar(plates)?;
        for n in 1..=plates {
            pb.set_message(format!("Plate {n}"));
            let plate = self
                .make_request(
                    Method::POST,
                    "/plates",
                    Some(json!({
                        "name": format!("Glycerol stock {n}"),
                        "plate_type": "glycerol_stock",
                        "plate_form": "standard96",
                        "status": "stocked",
                        "height": 8,
                        "length": 12,
                        "container_id": freezer_id
                    })),
                )
                .await?;
            self.created_objects.plates.push(plate);
            pb.inc(1);
        }
        pb.finish_with_message("Plates created!");

        // One sample per part, spread over the wells of all plates
        let well_ids: Vec<String> = self
            .created_objects
            .plates
            .iter()
            .flat_map(|plate| plate["wells"].as_array().cloned().unwrap_or_default())
            .filter_map(|well| well["id"].as_str().map(str::to_string))
            .collect();

        let payloads = self
            .created_objects
            .parts
            .iter()
            .zip(well_ids)
            .map(|(part, well_id)| {
                Ok(json!({
                    "part_id": id_of(part)?,
                    "sample_type": "plasmid",
                    "status": "confirmed",
                    "evidence": "ngs",
                    "well_ids": [well_id]
                }))
            })
            .collect::<Result<Vec<Value>>>()?;

        let pb = progress_bar(payloads.len())?;
        self.created_objects.samples = self.make_parallel_posts("/samples", payloads, &pb).await?;
        pb.finish_with_message("Samples created!");
        Ok(())
    }

    pub async fn create_distributions(&mut self) -> Result<()> {
        step(4, "Grouping plates into platesets and distributions...");

        let plate_ids = self
            .created_objects
            .plates
            .iter()
            .map(id_of)
            .collect::<Result<Vec<_>>>()?;

        let plateset = self
            .make_request(
                Method::POST,
                "/platesets",
                Some(json!({
                    "name": "Seed plateset",
                    "description": "Every seeded glycerol stock plate",
                    "plate_ids": plate_ids
                })),
            )
            .await?;
        let plateset_id = id_of(&plateset)?;
        self.created_objects.platesets.push(plateset);

        let distribution = self
            .make_request(
                Method::POST,
                "/distributions",
                Some(json!({
                    "name": "Open Yeast Collection",
                    "description": "Seeded distribution",
                    "plateset_ids": [plateset_id]
                })),
            )
            .await?;
        self.created_objects.distributions.push(distribution);

        println!(
            "{} Created {} plateset(s) and {} distribution(s)",
            style("✅").green(),
            self.created_objects.platesets.len(),
            self.created_objects.distributions.len()
        );
        Ok(())
    }

    pub async fn create_mta(&mut self) -> Result<()> {
        step(5, "Signing an open material transfer agreement...");

        let institution = self
            .make_request(
                Method::POST,
                "/institutions",
                Some(json!({
                    "name": format!("Seed University {}", &uuid::Uuid::new_v4().simple().to_string()[..4]),
                    "signed_master": true
                })),
            )
            .await?;
        let mta = self
            .make_request(
                Method::POST,
                "/mtas",
                Some(json!({
                    "mta_type": "open_mta",
                    "institution_id": id_of(&institution)?
                })),
            )
            .await?;
        self.created_objects.mta = Some(mta);
        Ok(())
    }

    pub async fn import_platemap(&self, path: &PathBuf) -> Result<()> {
        step(6, "Importing a vendor platemap...");

        let csv = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("could not read {}", path.display()))?;
        let container_id = self
            .created_objects
            .freezer_ids
            .first()
            .ok_or_else(|| anyhow!("containers must be created first"))?;

        // Every plate id in the first column is placed in the freezer
        let mut vendor_ids: Vec<String> = Vec::new();
        for line in csv.lines().skip(1) {
            if let Some(id) = line.split(',').next().map(str::trim) {
                if !id.is_empty() && !vendor_ids.iter().any(|known| known == id) {
                    vendor_ids.push(id.to_string());
                }
            }
        }
        let plates: Vec<Value> = vendor_ids
            .iter()
            .map(|vendor_id| {
                json!({
                    "plate_vendor_id": vendor_id,
                    "name": format!("Twist {vendor_id}"),
                    "container_id": container_id,
                    "plate_form": "standard384"
                })
            })
            .collect();

        let summary = self
            .make_request(
                Method::POST,
                "/imports/platemap",
                Some(json!({ "csv": csv, "plates": plates })),
            )
            .await?;
        println!("{} Platemap imported: {summary}", style("✅").green());
        Ok(())
    }

    pub fn print_summary(&self) {
        let created = &self.created_objects;
        println!();
        println!("{}", style("Seeding complete").bold().green());
        if let Some(root_id) = &created.root_id {
            println!("  Root:          {root_id}");
        }
        println!("  Parts:         {}", created.parts.len());
        println!("  Plates:        {}", created.plates.len());
        println!("  Samples:       {}", created.samples.len());
        println!("  Platesets:     {}", created.platesets.len());
        println!("  Distributions: {}", created.distributions.len());
        if let Some(mta) = &created.mta {
            println!("  MTA:           {}", mta["id"]);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("seed_database")
        .about("Seeds a running FreeGenes API with a small inventory")
        .arg(
            Arg::new("url")
                .long("url")
                .default_value("http://localhost:3000/api")
                .help("Base URL of the API, including /api"),
        )
        .arg(
            Arg::new("parts")
                .long("parts")
                .default_value("24")
                .value_parser(clap::value_parser!(usize))
                .help("Number of parts (and samples) to create"),
        )
        .arg(
            Arg::new("plates")
                .long("plates")
                .default_value("2")
                .value_parser(clap::value_parser!(usize))
                .help("Number of 96-well plates to create"),
        )
        .arg(
            Arg::new("platemap")
                .long("platemap")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Vendor platemap CSV to import after seeding"),
        )
        .get_matches();

    let url = matches
        .get_one::<String>("url")
        .ok_or_else(|| anyhow!("--url is required"))?;
    let parts = matches.get_one::<usize>("parts").copied().unwrap_or(24);
    let plates = matches.get_one::<usize>("plates").copied().unwrap_or(2);

    println!("{}", style("FreeGenes database seeder").bold().cyan());
    let mut seeder = DatabaseSeeder::new(url)?;
    seeder.test_connection().await?;

    seeder.create_containers().await?;
    seeder.create_parts(parts).await?;
    seeder.create_plates_with_samples(plates).await?;
    seeder.create_distributions().await?;
    seeder.create_mta().await?;
    if let Some(path) = matches.get_one::<PathBuf>("platemap") {
        seeder.import_platemap(path).await?;
    }

    seeder.print_summary();
    Ok(())
}
