//! Demo catalog data: vehicles by registration, parts by engine code.

use std::collections::HashMap;

use crate::catalog::{CompatiblePart, Vehicle, Vrm};
use crate::money::Money;

/// In-memory stand-in for the vehicle data and parts APIs.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    vehicles: HashMap<String, Vehicle>,
    parts_by_engine: HashMap<String, Vec<CompatiblePart>>,
    default_parts: Vec<CompatiblePart>,
}

impl MockCatalog {
    pub fn new() -> Self {
        let vehicles = [
            vehicle("AB12 CDE", "Volkswagen", "Golf GTI", 2019, "DLBA", "2.0 TSI", "Petrol", "DSG Automatic", "Hatchback", "Pure White", 5, "2025-08-15"),
            vehicle("MK67 XYZ", "BMW", "320d M Sport", 2017, "B47D20", "2.0 Diesel", "Diesel", "8-Speed Auto", "Saloon", "Mineral Grey", 4, "2025-03-22"),
            vehicle("YN19 ABC", "Audi", "A4 S-Line", 2019, "DETA", "2.0 TDI", "Diesel", "S-Tronic", "Saloon", "Mythos Black", 4, "2025-11-30"),
            vehicle("WR21 DEF", "Ford", "Focus ST", 2021, "M9DA", "2.3 EcoBoost", "Petrol", "6-Speed Manual", "Hatchback", "Performance Blue", 5, "2026-02-14"),
        ]
        .into_iter()
        .map(|v| (Vrm::parse(&v.vrm).as_str().to_string(), v))
        .collect();

        let mut parts_by_engine = HashMap::new();
        parts_by_engine.insert(
            "DLBA".to_string(),
            vec![
                part("1", "Timing Chain Kit with VVT Actuator", "INA", "INA-559003710", &["06K109158BK", "06L109088E"], 18999, Some(24999), 23, "Engine", true)
                    .notes("Includes chain, tensioner, guides, and VVT actuator"),
                part("2", "Water Pump Assembly", "HEPU", "P659", &["06L121011B", "06L121011H"], 7850, None, 45, "Cooling", true),
                part("3", "Turbocharger IS38", "BorgWarner", "BW-06K145722H", &["06K145722H", "06K145702Q"], 125000, Some(145000), 3, "Engine", true)
                    .notes("OE specification turbo with actuator"),
                part("4", "Spark Plug Set (4pcs)", "NGK", "NGK-95770", &["06K905601D"], 4299, None, 150, "Ignition", true),
                part("5", "Oil Filter", "MANN", "HU7020z", &["06L115562"], 1299, None, 200, "Filtration", true),
                part("6", "Brake Pad Set Front", "TRW", "GDB1956", &["5Q0698151S"], 5499, None, 67, "Braking", true),
            ],
        );
        parts_by_engine.insert(
            "B47D20".to_string(),
            vec![
                part("7", "Timing Chain Kit Complete", "Febi Bilstein", "47978", &["11318510014", "11318510015"], 21500, Some(28900), 12, "Engine", true),
                part("8", "EGR Valve", "Pierburg", "7.03622.10.0", &["11717810871"], 18999, None, 8, "Emissions", true),
                part("9", "Fuel Filter", "MANN", "WK820/18", &["13328591019"], 2850, None, 89, "Filtration", true),
                part("10", "Brake Disc Set Front", "Brembo", "09.C401.13", &["34116860907"], 16500, None, 24, "Braking", true),
            ],
        );
        parts_by_engine.insert(
            "DETA".to_string(),
            vec![
                part("11", "DPF Pressure Sensor", "Bosch", "0281006082", &["059906051C"], 6899, None, 15, "Emissions", true),
                part("12", "Injector Set (4pcs)", "Bosch", "0445110471", &["04L130277AC"], 52000, Some(62000), 6, "Fuel System", true),
                part("13", "Thermostat Housing", "Wahler", "410671.87D", &["04L121111N"], 4599, None, 33, "Cooling", true),
            ],
        );
        parts_by_engine.insert(
            "M9DA".to_string(),
            vec![
                part("14", "Turbo Inlet Pipe", "Forge Motorsport", "FMINLMK4", &["LX6E-9F472-CE"], 18900, None, 7, "Induction", false),
                part("15", "Clutch Kit Complete", "LuK", "624393800", &["G1FZ-7563-A"], 38500, None, 4, "Transmission", true),
                part("16", "Intercooler", "Mishimoto", "MMINT-RS-16", &["G1FY-6K775-A"], 45000, Some(52000), 0, "Cooling", false)
                    .notes("Performance upgrade - larger core"),
            ],
        );

        let default_parts = vec![
            part("d1", "Air Filter Element", "MANN", "C30189", &["Various"], 1899, None, 100, "Filtration", true),
            part("d2", "Wiper Blade Set", "Bosch", "3397014208", &["Various"], 2899, None, 50, "Accessories", true),
        ];

        Self {
            vehicles,
            parts_by_engine,
            default_parts,
        }
    }

    /// Find a vehicle by registration.
    pub fn vehicle(&self, vrm: &Vrm) -> Option<&Vehicle> {
        self.vehicles.get(vrm.as_str())
    }

    /// Parts for an engine code; unknown codes get the generic list.
    pub fn compatible_parts(&self, engine_code: &str) -> &[CompatiblePart] {
        self.parts_by_engine
            .get(engine_code)
            .map(Vec::as_slice)
            .unwrap_or(self.default_parts.as_slice())
    }

    /// Find any catalogued part by its catalog number.
    pub fn part_by_number(&self, part_number: &str) -> Option<&CompatiblePart> {
        self.parts_by_engine
            .values()
            .flatten()
            .chain(self.default_parts.iter())
            .find(|p| p.part_number.eq_ignore_ascii_case(part_number))
    }

    /// Registrations known to the catalog, formatted for display.
    pub fn known_registrations(&self) -> Vec<String> {
        let mut regs: Vec<String> = self.vehicles.values().map(|v| v.vrm.clone()).collect();
        regs.sort();
        regs
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::too_many_arguments)]
fn vehicle(
    vrm: &str,
    make: &str,
    model: &str,
    year: u16,
    engine_code: &str,
    engine_size: &str,
    fuel_type: &str,
    transmission: &str,
    body_type: &str,
    colour: &str,
    doors: u8,
    mot_expiry: &str,
) -> Vehicle {
    Vehicle {
        vrm: vrm.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year,
        engine_code: engine_code.to_string(),
        engine_size: engine_size.to_string(),
        fuel_type: fuel_type.to_string(),
        transmission: transmission.to_string(),
        body_type: body_type.to_string(),
        colour: colour.to_string(),
        doors,
        mot_expiry: mot_expiry.to_string(),
        tax_status: "Taxed".to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn part(
    id: &str,
    name: &str,
    brand: &str,
    part_number: &str,
    oe_numbers: &[&str],
    price_pence: i64,
    original_pence: Option<i64>,
    stock_count: u32,
    category: &str,
    is_oe_quality: bool,
) -> CompatiblePart {
    CompatiblePart {
        id: id.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        part_number: part_number.to_string(),
        oe_numbers: oe_numbers.iter().map(|s| s.to_string()).collect(),
        price: Money::gbp(price_pence),
        original_price: original_pence.map(Money::gbp),
        in_stock: stock_count > 0,
        stock_count,
        category: category.to_string(),
        is_oe_quality,
        fitment_notes: None,
    }
}

impl CompatiblePart {
    fn notes(mut self, notes: &str) -> Self {
        self.fitment_notes = Some(notes.to_string());
        self
    }
}
