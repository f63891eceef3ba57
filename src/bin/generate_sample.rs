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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let years = 2018..=2024;
    let subcategories = ["Online", "Retail", "Wholesale"];
    let categories = [
        ("Toys", 120.0),
        ("Books", 80.0),
        ("Garden", 45.0),
        ("Electronics", 300.0),
    ];

    // Two header rows: year above subcategory, column 0 left blank.
    let mut year_row = vec![String::new()];
    let mut sub_row = vec![String::new()];
    for year in years.clone() {
        for sub in &subcategories {
            year_row.push(year.to_string());
            sub_row.push(sub.to_string());
        }
    }

    let output_path = "sample_sales.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer.write_record(&year_row)?;
    writer.write_record(&sub_row)?;

    for (category, base) in &categories {
        let mut row = vec![category.to_string()];
        for (i, _year) in years.clone().enumerate() {
            let trend = 1.0 + 0.06 * i as f64;
            for (j, _) in subcategories.iter().enumerate() {
                let share = 1.0 / (j as f64 + 1.0);
                let noise = 0.9 + 0.2 * rng.next_f64();
                row.push(format!("{:.1}", base * trend * share * noise));
            }
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;

    println!(
        "Wrote {} categories × {} columns to {output_path}",
        categories.len(),
        year_row.len() - 1
    );
    Ok(())
}
