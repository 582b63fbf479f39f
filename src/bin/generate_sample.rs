//! Writes a synthetic `Electric_Vehicle_Population_Data.csv` with the same
//! header layout as the Washington State dataset, for running the dashboard
//! without downloading the real file.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

const HEADER: [&str; 11] = [
    "VIN (1-10)",
    "County",
    "City",
    "State",
    "Postal Code",
    "Model Year",
    "Make",
    "Model",
    "Electric Vehicle Type",
    "Clean Alternative Fuel Vehicle (CAFV) Eligibility",
    "Electric Range",
];

const BEV: &str = "Battery Electric Vehicle (BEV)";
const PHEV: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";

const ELIGIBLE: &str = "Clean Alternative Fuel Vehicle Eligible";
const LOW_RANGE: &str = "Not eligible due to low battery range";
const UNKNOWN: &str = "Eligibility unknown as battery range has not been researched";

/// (make, model, type, typical range in miles; 0 = not researched)
const MODELS: &[(&str, &str, &str, u32)] = &[
    ("TESLA", "MODEL 3", BEV, 220),
    ("TESLA", "MODEL Y", BEV, 0),
    ("TESLA", "MODEL S", BEV, 270),
    ("NISSAN", "LEAF", BEV, 150),
    ("CHEVROLET", "BOLT EV", BEV, 259),
    ("CHEVROLET", "VOLT", PHEV, 53),
    ("KIA", "NIRO", PHEV, 26),
    ("TOYOTA", "PRIUS PRIME", PHEV, 25),
    ("BMW", "I3", BEV, 153),
    ("FORD", "MUSTANG MACH-E", BEV, 0),
    ("JEEP", "WRANGLER", PHEV, 21),
];

/// (county, city, postal code)
const PLACES: &[(&str, &str, &str)] = &[
    ("King", "Seattle", "98122"),
    ("King", "Bellevue", "98004"),
    ("Snohomish", "Everett", "98201"),
    ("Pierce", "Tacoma", "98402"),
    ("Clark", "Vancouver", "98661"),
    ("Thurston", "Olympia", "98501"),
    ("Kitsap", "Bremerton", "98310"),
];

fn eligibility(range: u32) -> &'static str {
    match range {
        0 => UNKNOWN,
        r if r >= 30 => ELIGIBLE,
        _ => LOW_RANGE,
    }
}

fn vin(rng: &mut SimpleRng) -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHJKLMNPRSTUVWXYZ";
    (0..10)
        .map(|_| *rng.pick(ALPHABET) as char)
        .collect()
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "Electric_Vehicle_Population_Data.csv";
    let rows = 2_000;

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(HEADER).context("writing header")?;

    for _ in 0..rows {
        let &(make, model, ty, range) = rng.pick(MODELS);
        let &(county, city, postal) = rng.pick(PLACES);
        let year = (2012 + rng.below(12)).to_string();

        // Some rows leave the model blank, like the real export does.
        let model = if rng.below(50) == 0 { "" } else { model };

        writer
            .write_record([
                vin(&mut rng).as_str(),
                county,
                city,
                "WA",
                postal,
                year.as_str(),
                make,
                model,
                ty,
                eligibility(range),
                range.to_string().as_str(),
            ])
            .context("writing row")?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} vehicles to {output_path}");
    Ok(())
}
