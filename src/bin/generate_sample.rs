//! Writes a synthetic `ifood_df.csv` so the dashboard can be run without the
//! real dataset. Deterministic: same seed, same file. Missing incomes and a
//! few exact duplicate rows are injected on purpose so the cleaning path has
//! something to do.

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn bernoulli(&mut self, p: f64) -> u8 {
        u8::from(self.next_f64() < p)
    }
}

struct Customer {
    income: Option<f64>,
    kidhome: u8,
    response: u8,
    complain: u8,
    accepted: [u8; 5],
    spend: [f64; 6],
}

fn generate_customer(rng: &mut SimpleRng) -> Customer {
    let income = rng.gauss(52_000.0, 21_000.0).clamp(2_000.0, 160_000.0);
    // Richer customers respond and spend more, and have fewer kids at home.
    let wealth = ((income - 20_000.0) / 100_000.0).clamp(0.0, 1.0);

    let kidhome = match rng.next_f64() {
        x if x < 0.35 + 0.3 * wealth => 0,
        x if x < 0.85 => 1,
        _ => 2,
    };

    let accepted = [
        rng.bernoulli(0.04 + 0.08 * wealth),
        rng.bernoulli(0.01 + 0.03 * wealth),
        rng.bernoulli(0.07),
        rng.bernoulli(0.05 + 0.06 * wealth),
        rng.bernoulli(0.04 + 0.09 * wealth),
    ];

    let boost = 0.1 * accepted.iter().filter(|&&a| a == 1).count() as f64;
    let response = rng.bernoulli(0.08 + 0.15 * wealth + boost);
    let complain = rng.bernoulli(0.01);

    let spend_scale = [300.0, 26.0, 170.0, 38.0, 27.0, 44.0];
    let mut spend = [0.0; 6];
    for (s, scale) in spend.iter_mut().zip(spend_scale) {
        *s = (rng.gauss(scale * (0.3 + 1.4 * wealth), scale * 0.5)).max(0.0).round();
    }

    // ~2.5% of incomes go missing, like the real table.
    let income = if rng.next_f64() < 0.025 { None } else { Some(income.round()) };

    Customer {
        income,
        kidhome,
        response,
        complain,
        accepted,
        spend,
    }
}

fn record(c: &Customer) -> Vec<String> {
    let mut fields = vec![
        c.income.map(|v| format!("{v}")).unwrap_or_default(),
        c.response.to_string(),
        c.complain.to_string(),
        c.kidhome.to_string(),
    ];
    fields.extend(c.accepted.iter().map(u8::to_string));
    fields.extend(c.spend.iter().map(|v| format!("{v}")));
    fields
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let output_path = "ifood_df.csv";

    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Income",
            "Response",
            "Complain",
            "Kidhome",
            "AcceptedCmp1",
            "AcceptedCmp2",
            "AcceptedCmp3",
            "AcceptedCmp4",
            "AcceptedCmp5",
            "MntWines",
            "MntFruits",
            "MntMeatProducts",
            "MntFishProducts",
            "MntSweetProducts",
            "MntGoldProds",
        ])
        .expect("Failed to write header");

    let n_customers = 2200;
    let mut rows = 0usize;
    for i in 0..n_customers {
        let customer = generate_customer(&mut rng);
        let fields = record(&customer);
        writer.write_record(&fields).expect("Failed to write row");
        rows += 1;

        // Every 100th customer appears twice, exactly.
        if i % 100 == 0 {
            writer
                .write_record(&fields)
                .expect("Failed to write duplicate row");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} customers to {output_path}");
}
