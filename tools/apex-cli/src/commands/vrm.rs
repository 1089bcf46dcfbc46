//! Registration lookup.

use anyhow::{bail, Result};
use apex_commerce::cart::UK_VAT_RATE;
use apex_commerce::catalog::{categories, format_vrm, PartQuery, PartSort, Vrm};
use apex_storefront::{ScopedTask, VehicleLookup};

use super::VrmArgs;
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Run the vrm command.
pub async fn run(args: VrmArgs, ctx: &Context) -> Result<()> {
    let sort: PartSort = args.sort.parse()?;
    let vrm = Vrm::parse(&args.registration);
    let mut store = ctx.open_storefront()?;

    let spinner = ctx
        .output
        .spinner(&format!("Looking up {}...", format_vrm(&args.registration)));
    let lookup = ScopedTask::spawn({
        let vehicles = store.vehicles();
        let vrm = vrm.clone();
        async move { vehicles.lookup_with_parts(&vrm).await }
    });
    let result = lookup.join().await;
    spinner.finish_and_clear();
    let found = result??;

    let mut query = PartQuery::new().with_sort(sort);
    if let Some(category) = &args.category {
        query = query.with_category(category.as_str());
    }
    let parts = query.apply(&found.parts);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "vehicle": found.vehicle,
            "categories": categories(&found.parts),
            "parts": parts,
        }));
    } else {
        let vehicle = &found.vehicle;
        ctx.output.header(&vehicle.description());
        ctx.output.kv("Registration", &vehicle.vrm);
        ctx.output.kv(
            "Engine",
            &format!("{} ({})", vehicle.engine_size, vehicle.engine_code),
        );
        ctx.output.kv("Fuel", &vehicle.fuel_type);
        ctx.output.kv("Transmission", &vehicle.transmission);
        ctx.output.kv("Colour", &vehicle.colour);
        ctx.output.kv("MOT expiry", &vehicle.mot_expiry);
        ctx.output.kv("Tax", &vehicle.tax_status);

        let display = store.cart().vat_display();
        ctx.output.header(&format!(
            "Compatible parts ({} of {}, {}, prices {})",
            parts.len(),
            found.parts.len(),
            sort.display_name(),
            display.label()
        ));

        let widths = [12, 34, 10, 9, 14];
        ctx.output
            .table_row(&["PART", "NAME", "BRAND", "PRICE", "STOCK"], &widths);
        for part in &parts {
            let name = truncate(&part.name, 34);
            let price = display.present(part.price, UK_VAT_RATE).to_string();
            let stock = stock_badge(part);
            ctx.output.table_row(
                &[
                    part.part_number.as_str(),
                    name.as_str(),
                    part.brand.as_str(),
                    price.as_str(),
                    stock.as_str(),
                ],
                &widths,
            );
            if let Some(savings) = part.savings() {
                ctx.output.list_item(&format!("save {} on {}", savings, part.part_number));
            }
            if let Some(notes) = &part.fitment_notes {
                ctx.output.list_item(notes);
            }
        }

        ctx.output.info(&format!(
            "Categories: {}",
            categories(&found.parts).join(", ")
        ));
    }

    if let Some(part_number) = &args.add {
        let Some(part) = found
            .parts
            .iter()
            .find(|p| p.part_number.eq_ignore_ascii_case(part_number.trim()))
        else {
            bail!("{} does not fit {}", part_number, vrm);
        };
        store.add_part(&part.part_number, 1)?;
        ctx.output.success(&format!(
            "Added {} to cart ({} items)",
            part.name,
            store.cart().item_count()
        ));
    }

    Ok(())
}
