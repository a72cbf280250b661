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

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (code, type, description, typical low price, typical high price)
const CODES: [(&str, &str, &str, f64, f64); 6] = [
    ("70450", "CPT", "CT head/brain without contrast", 180.0, 2_400.0),
    ("70551", "CPT", "MRI brain without contrast", 400.0, 4_100.0),
    ("80053", "CPT", "Comprehensive metabolic panel", 12.0, 310.0),
    ("99213", "CPT", "Office or other outpatient visit, established patient", 60.0, 420.0),
    ("G0378", "HCPCS", "Hospital observation service, per hour", 25.0, 180.0),
    ("J1885", "HCPCS", "", 2.0, 45.0),
];

/// (name, [candidate cities], state)
const HOSPITALS: [(&str, &[&str], &str); 8] = [
    ("Mercy General Hospital", &["Sacramento"], "CA"),
    ("St. Luke's Regional Medical Center", &["Boise", "Meridian"], "ID"),
    ("Riverside Methodist Hospital", &["Columbus"], "OH"),
    ("University of Iowa Hospitals and Clinics", &["Iowa City"], "IA"),
    ("Baptist Memorial Hospital - Memphis", &["Memphis"], "TN"),
    ("Providence St. Vincent Medical Center", &["Portland", ""], "OR"),
    ("Maine Medical Center", &["Portland"], "ME"),
    ("Texas Health Presbyterian Hospital Dallas", &["Dallas"], "TX"),
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "hospital_prices_medians_common.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "code|1",
        "code|1|type",
        "description",
        "hospital_name",
        "hospital_city",
        "hospital_state",
        "med_min",
        "med_max",
    ])?;

    let mut written = 0usize;
    for &(code, code_type, desc, low, high) in &CODES {
        for &(hospital, cities, state) in &HOSPITALS {
            // not every hospital publishes every code
            if rng.next_f64() < 0.2 {
                continue;
            }

            // several payer plans per hospital
            let plans = 1 + (rng.next_u64() % 4) as usize;
            for _ in 0..plans {
                let med_min = rng.range(low, (low + high) / 2.0);
                let med_max = rng.range(med_min, high);
                let city = *rng.pick(cities);
                let med_min = format!("{med_min:.2}");
                let med_max = format!("{med_max:.2}");
                writer.write_record([
                    code,
                    code_type,
                    desc,
                    hospital,
                    city,
                    state,
                    med_min.as_str(),
                    med_max.as_str(),
                ])?;
                written += 1;
            }
        }

        // a malformed record the viewer is expected to skip
        writer.write_record([code, code_type, desc, "Unknown Clinic", "", "", "n/a", ""])?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {written} price rows for {} codes to {output_path}", CODES.len());
    Ok(())
}
