//! The migration runner.
//!
//! Drives the export through two sequential passes: one over the product
//! rows (create-or-update, variants, images) and an optional one over the
//! accumulated categories (smart collections). Per-row remote failures are
//! reported and skipped so one bad product does not abort the batch; a store
//! without a location is the one fatal startup condition.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use woomig_core::{AppConfig, CanonicalProduct, MigrationContext, ProductRole, SourceRow};
use woomig_shopify::{AdminClient, UserError};
use woomig_transform::{assemble_product, child_rows, classify_row, normalize_decade, row_sku};

use crate::input;
use crate::side_logs::SideLogs;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// Path to the WooCommerce product export.
    #[arg(long)]
    pub csv: PathBuf,

    /// Replace the images of products that already exist in the store.
    #[arg(long)]
    pub sync_images: bool,

    /// After the product pass, create and publish a smart collection for
    /// every accumulated category.
    #[arg(long)]
    pub create_collections: bool,

    /// Stop before migrating and print what the run would do.
    #[arg(long)]
    pub dry_run: bool,
}

pub(crate) async fn run_migrate(config: &AppConfig, args: &MigrateArgs) -> anyhow::Result<()> {
    let client = AdminClient::new(config)?;

    let location_id = client
        .default_location_id()
        .await?
        .ok_or_else(|| anyhow::anyhow!("store has no locations; inventory cannot be assigned"))?;
    tracing::info!(%location_id, "using default location");

    let logs = SideLogs::create(config)?;

    let rows = input::load_rows(&args.csv)?;
    println!("loaded {} rows from {}", rows.len(), args.csv.display());

    if args.dry_run {
        print_dry_run(&rows);
        return Ok(());
    }

    let runner = Runner {
        client,
        config,
        logs,
        location_id,
        sync_images: args.sync_images,
    };

    let mut ctx = MigrationContext::new();
    let mut migrated: usize = 0;
    let mut failed: usize = 0;

    for row in &rows {
        if classify_row(row) == ProductRole::Variant {
            continue;
        }
        let key = row_sku(row);
        if key.is_empty() {
            tracing::warn!(line = row.line(), name = row.get("Name"), "skipping row without SKU");
            continue;
        }

        match runner.migrate_row(&mut ctx, &rows, row).await {
            Ok(()) => migrated = migrated.saturating_add(1),
            Err(e) => {
                failed = failed.saturating_add(1);
                eprintln!(
                    "error: line {}: {} ({key}): {e}",
                    row.line(),
                    row.get("Name")
                );
            }
        }

        runner.drain_dimensions(&mut ctx)?;
        runner.throttle().await;
    }

    println!("migrated {migrated} products ({failed} failed)");

    if args.create_collections {
        runner.sync_collections(&ctx).await?;
    }

    Ok(())
}

struct Runner<'a> {
    client: AdminClient,
    config: &'a AppConfig,
    logs: SideLogs,
    location_id: String,
    sync_images: bool,
}

impl Runner<'_> {
    /// Migrates one standalone or parent row: create-or-update, then the
    /// variant batch for parents, then an optional image resync.
    async fn migrate_row(
        &self,
        ctx: &mut MigrationContext,
        rows: &[SourceRow],
        row: &SourceRow,
    ) -> anyhow::Result<()> {
        let mut product = assemble_product(row, None, ctx, &self.config.fallback_vendor);
        product.existing_remote_id = self.client.find_product_by_sku(&product.sku).await?;

        let outcome = if let Some(id) = product.existing_remote_id.clone() {
            println!("updating {} ({})", product.title, product.sku);
            self.client.update_product(&id, &product).await?
        } else {
            println!("creating {} ({})", product.title, product.sku);
            self.client.create_product(&product).await?
        };
        report_user_errors(&product, &outcome.user_errors);

        let remote_id = outcome.id.or_else(|| product.existing_remote_id.clone());

        if product.is_parent() {
            self.attach_children(ctx, rows, &product, remote_id.as_deref())
                .await?;
        }

        if self.sync_images && product.existing_remote_id.is_some() {
            if let Some(id) = &remote_id {
                self.resync_images(row, &product, id).await?;
            }
        }

        Ok(())
    }

    /// Assembles every child row of a parent and attaches them in one bulk
    /// call. A parent without a remote id cannot take variants; that is a
    /// per-row error, not a batch failure.
    async fn attach_children(
        &self,
        ctx: &mut MigrationContext,
        rows: &[SourceRow],
        parent: &CanonicalProduct,
        parent_id: Option<&str>,
    ) -> anyhow::Result<()> {
        let children: Vec<CanonicalProduct> = child_rows(rows, &parent.sku)
            .into_iter()
            .map(|child_row| {
                let mut child =
                    assemble_product(child_row, Some(parent), ctx, &self.config.fallback_vendor);
                child.parent_remote_id = parent_id.map(str::to_string);
                child
            })
            .collect();

        if children.is_empty() {
            tracing::warn!(sku = %parent.sku, "parent has no variant rows");
            return Ok(());
        }

        let Some(parent_id) = parent_id else {
            eprintln!(
                "error: {} ({}): cannot attach {} variants, parent has no remote id",
                parent.title,
                parent.sku,
                children.len()
            );
            return Ok(());
        };

        println!(
            "attaching {} variants to {} ({})",
            children.len(),
            parent.title,
            parent.sku
        );
        let user_errors = self
            .client
            .attach_variants(parent_id, &children, &self.location_id)
            .await?;
        report_user_errors(parent, &user_errors);

        Ok(())
    }

    /// Replaces an existing product's images from the row's source URLs.
    /// Failures land in the image-errors log and do not fail the row.
    async fn resync_images(
        &self,
        row: &SourceRow,
        product: &CanonicalProduct,
        product_id: &str,
    ) -> anyhow::Result<()> {
        let urls = product.image_urls();
        println!("resyncing {} images for {}", urls.len(), product.sku);

        match self
            .client
            .resync_images(product_id, &urls, &product.title)
            .await
        {
            Ok(user_errors) => {
                for err in &user_errors {
                    eprintln!("error: {} image upload: {}", product.sku, err.message);
                    self.logs.append_image_error(
                        row.line(),
                        &product.sku,
                        &product.title,
                        &product.images,
                        &err.message,
                    )?;
                }
            }
            Err(e) => {
                eprintln!("error: {} image resync: {e}", product.sku);
                self.logs.append_image_error(
                    row.line(),
                    &product.sku,
                    &product.title,
                    &product.images,
                    &e.to_string(),
                )?;
            }
        }

        Ok(())
    }

    /// Creates and publishes one smart collection per accumulated category.
    /// Collection-level failures are reported and skipped.
    async fn sync_collections(&self, ctx: &MigrationContext) -> anyhow::Result<()> {
        let titles = collection_titles(ctx);
        println!("creating {} collections", titles.len());

        for title in titles {
            match self.client.create_collection(&title).await {
                Ok(outcome) => {
                    for err in &outcome.user_errors {
                        eprintln!("error: collection '{title}': {}", err.message);
                    }
                    if let Some(id) = outcome.id {
                        match self.client.publish_collection(&id).await {
                            Ok(()) => println!("created collection {title}"),
                            Err(e) => {
                                eprintln!("error: collection '{title}': publish failed: {e}");
                            }
                        }
                    }
                }
                Err(e) => eprintln!("error: collection '{title}': {e}"),
            }
            self.throttle().await;
        }

        Ok(())
    }

    fn drain_dimensions(&self, ctx: &mut MigrationContext) -> anyhow::Result<()> {
        for record in ctx.drain_unparsed_dimensions() {
            tracing::info!(
                line = record.line,
                sku = %record.sku,
                raw = %record.raw,
                "dimension string needs manual attention"
            );
            self.logs.append_dimension(&record)?;
        }
        Ok(())
    }

    async fn throttle(&self) {
        if self.config.throttle_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.throttle_ms)).await;
        }
    }
}

fn report_user_errors(product: &CanonicalProduct, errors: &[UserError]) {
    for err in errors {
        eprintln!(
            "error: {} ({}): {}",
            product.title, product.sku, err.message
        );
    }
}

/// Collection titles for the final pass: each accumulated category,
/// decade-normalized when it names a decade, deduplicated after
/// normalization.
fn collection_titles(ctx: &MigrationContext) -> BTreeSet<String> {
    ctx.categories()
        .map(|category| normalize_decade(category).unwrap_or_else(|| category.to_string()))
        .collect()
}

fn print_dry_run(rows: &[SourceRow]) {
    let mut standalone: usize = 0;
    let mut parents: usize = 0;
    let mut variants: usize = 0;
    let mut skipped: usize = 0;

    for row in rows {
        match classify_row(row) {
            ProductRole::Variant => variants = variants.saturating_add(1),
            ProductRole::Parent => parents = parents.saturating_add(1),
            ProductRole::Standalone => {
                if row_sku(row).is_empty() {
                    skipped = skipped.saturating_add(1);
                } else {
                    standalone = standalone.saturating_add(1);
                }
            }
        }
        if classify_row(row) != ProductRole::Variant && !row_sku(row).is_empty() {
            println!(
                "dry-run: would migrate {} ({})",
                row.get("Name"),
                row_sku(row)
            );
        }
    }

    println!(
        "dry-run: {standalone} standalone products, {parents} parents with {variants} variant rows, {skipped} rows without SKU"
    );
}
