//! Writes a deterministic sample launch-records CSV for demos and manual
//! testing of the dashboard.

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let sites = [
        "CCAFS LC-40",
        "CCAFS SLC-40",
        "KSC LC-39A",
        "VAFB SLC-4E",
    ];

    // (category, payload range in kg, success probability)
    let boosters = [
        ("v1.0", (0.0, 700.0), 0.40),
        ("v1.1", (300.0, 3500.0), 0.55),
        ("FT", (1500.0, 7000.0), 0.75),
        ("B4", (2000.0, 9600.0), 0.80),
        ("B5", (2500.0, 9600.0), 0.90),
    ];

    let output_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Launch Site",
            "Payload Mass (kg)",
            "Booster Version Category",
            "class",
        ])
        .expect("Failed to write header");

    let n_records = 120;
    for _ in 0..n_records {
        let site = rng.pick(&sites);
        let &(category, (lo, hi), success_prob) = rng.pick(&boosters);
        let payload = (lo + (hi - lo) * rng.next_f64()).round();
        let class = if rng.chance(success_prob) { 1 } else { 0 };

        writer
            .write_record([
                site.to_string(),
                payload.to_string(),
                category.to_string(),
                class.to_string(),
            ])
            .expect("Failed to write record");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_records} launch records to {output_path}");
}
