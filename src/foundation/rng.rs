/// Deterministic SplitMix64 generator. Identical seeds yield identical streams on every platform.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform sample in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Standard-normal sample (Box-Muller, one value per call).
    pub fn gaussian(&mut self) -> f64 {
        let u1 = 1.0 - self.next_f64_01(); // (0, 1]
        let u2 = self.next_f64_01();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }

    /// Standard-normal sample rejected until it falls inside `[-1, 1]`.
    pub fn gaussian_within_one_sigma(&mut self) -> f32 {
        loop {
            let g = self.gaussian();
            if (-1.0..=1.0).contains(&g) {
                return g as f32;
            }
        }
    }
}
