use rand::seq::SliceRandom;
use rand::Rng;

const SYMBOLS: [char; 6] = ['*', '+', '•', '✦', '✶', '░'];
const GRAVITY: f64 = 12.0;

/// Single piece of confetti, or one letter of the banner.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    /// Banner letters fly to a fixed target and stay there.
    pub target: Option<(f64, f64)>,
}

impl Particle {
    fn confetti<R: Rng + ?Sized>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-4.0..4.0),
            vel_y: rng.gen_range(-6.0..-1.0),
            symbol: *SYMBOLS.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(1.5..3.0),
            target: None,
        }
    }

    fn letter(from: (f64, f64), to: (f64, f64), symbol: char, color_index: usize) -> Self {
        Self {
            x: from.0,
            y: from.1,
            vel_x: to.0 - from.0,
            vel_y: to.1 - from.1,
            symbol,
            color_index,
            age: 0.0,
            max_age: f64::INFINITY,
            target: Some(to),
        }
    }

    pub fn is_letter(&self) -> bool {
        self.target.is_some()
    }

    /// Advance by `dt` seconds; false once the particle has burnt out.
    fn update(&mut self, dt: f64) -> bool {
        match self.target {
            Some((tx, ty)) => {
                let dist = ((tx - self.x).powi(2) + (ty - self.y).powi(2)).sqrt();
                if dist > 0.5 {
                    self.x += self.vel_x * dt * 4.0;
                    self.y += self.vel_y * dt * 4.0;
                    self.vel_x = tx - self.x;
                    self.vel_y = ty - self.y;
                } else {
                    self.x = tx;
                    self.y = ty;
                    self.vel_x = 0.0;
                    self.vel_y = 0.0;
                }
            }
            None => {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_y += GRAVITY * dt;
            }
        }

        self.age += dt;
        self.age < self.max_age
    }
}

/// One-shot confetti burst shown when a game is won.
#[derive(Debug)]
pub struct Confetti {
    pub particles: Vec<Particle>,
    pub elapsed: f64,
    pub duration: f64,
    pub is_active: bool,
    pub width: f64,
    pub height: f64,
}

impl Confetti {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            elapsed: 0.0,
            duration: 3.0,
            is_active: false,
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn start<R: Rng + ?Sized>(&mut self, width: u16, height: u16, rng: &mut R) {
        self.particles.clear();
        self.elapsed = 0.0;
        self.is_active = true;
        self.width = width as f64;
        self.height = height as f64;

        let center_x = self.width / 2.0;
        let center_y = self.height / 2.0;

        self.spell("YOU WIN!", center_x, center_y - 2.0, rng);

        for _ in 0..40 {
            let x = rng.gen_range(0.0..self.width.max(1.0));
            let y = rng.gen_range(0.0..(self.height / 3.0).max(1.0));
            self.particles.push(Particle::confetti(x, y, rng));
        }
    }

    fn spell<R: Rng + ?Sized>(&mut self, text: &str, center_x: f64, y: f64, rng: &mut R) {
        let spacing = 2.0;
        let start_x = center_x - (text.chars().count() as f64 - 1.0) * spacing / 2.0;

        for (i, ch) in text.chars().enumerate().filter(|(_, c)| *c != ' ') {
            let from = (
                center_x + rng.gen_range(-10.0..10.0),
                y + rng.gen_range(-4.0..4.0),
            );
            let to = (start_x + i as f64 * spacing, y);
            self.particles
                .push(Particle::letter(from, to, ch, rng.gen_range(0..7)));
        }
    }

    /// Advance the animation by `dt` seconds. Stops for good once the
    /// duration has passed.
    pub fn update(&mut self, dt: f64) {
        if !self.is_active {
            return;
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.stop();
            return;
        }

        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|p| {
            let alive = p.update(dt);
            if p.is_letter() {
                return alive;
            }
            let margin = 2.0;
            let off_screen = p.y > height + margin || p.x < -margin || p.x > width + margin;
            alive && !off_screen
        });
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.particles.clear();
    }
}

impl Default for Confetti {
    fn default() -> Self {
        Self::new()
    }
}
