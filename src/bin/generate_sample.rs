use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const COURSE_COUNT: usize = 400;

const SUBJECTS: [(&str, &[&str]); 4] = [
    ("Business Finance", &["Excel", "Accounting", "Trading", "Investing", "Financial Modeling"]),
    ("Graphic Design", &["Photoshop", "Illustrator", "Logo Design", "Typography", "Drawing"]),
    ("Musical Instruments", &["Guitar", "Piano", "Drums", "Ukulele", "Violin"]),
    ("Web Development", &["JavaScript", "Python", "React", "Django", "Excel VBA"]),
];

const LEVELS: [&str; 4] = ["All Levels", "Beginner Level", "Intermediate Level", "Expert Level"];

const TITLE_FORMS: [&str; 5] = [
    "Learn {} from Scratch",
    "{} Masterclass",
    "The Complete {} Course",
    "{} for Beginners",
    "Practical {} Projects",
];

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

    /// Uniform index in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

/// One generated row, every field already in its on-disk text form.
struct SampleCourse {
    id: i64,
    title: String,
    url: String,
    price: String,
    subscribers: Option<i64>,
    level: String,
    published: String,
    subject: String,
}

fn generate(rng: &mut SimpleRng) -> Vec<SampleCourse> {
    (0..COURSE_COUNT)
        .map(|i| {
            let (subject, topics) = *rng.pick(&SUBJECTS);
            let topic = *rng.pick(topics);
            let title = rng.pick(&TITLE_FORMS).replace("{}", topic);
            let slug = title.to_lowercase().replace(' ', "-");

            // Mostly whole-dollar prices, plus the dirty tokens real exports contain.
            let price = match rng.below(20) {
                0 | 1 => "Free".to_string(),
                2 => "TRUE".to_string(),
                3 => format!("${}.99", 10 + rng.below(190)),
                _ => (20 + 5 * rng.below(40)).to_string(),
            };

            let subscribers = match rng.below(50) {
                0 => None,
                _ => Some((rng.next_f64().powi(3) * 50_000.0) as i64),
            };

            let year = 2011 + rng.below(7);
            let month = 1 + rng.below(12);
            let day = 1 + rng.below(28);
            let published = match rng.below(100) {
                0 => "unknown".to_string(),
                _ => format!(
                    "{year}-{month:02}-{day:02}T{:02}:{:02}:00Z",
                    rng.below(24),
                    rng.below(60)
                ),
            };

            SampleCourse {
                id: 1000 + i as i64,
                url: format!("https://www.udemy.com/{slug}-{i}/"),
                title,
                price,
                subscribers,
                level: rng.pick(&LEVELS).to_string(),
                published,
                subject: subject.to_string(),
            }
        })
        .collect()
}

fn write_csv(path: &str, courses: &[SampleCourse]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record([
        "course_id",
        "course_title",
        "url",
        "price",
        "num_subscribers",
        "level",
        "published_timestamp",
        "subject",
    ])?;
    for c in courses {
        let id = c.id.to_string();
        let subscribers = c.subscribers.map(|n| n.to_string()).unwrap_or_default();
        writer.write_record([
            id.as_str(),
            c.title.as_str(),
            c.url.as_str(),
            c.price.as_str(),
            subscribers.as_str(),
            c.level.as_str(),
            c.published.as_str(),
            c.subject.as_str(),
        ])?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(path: &str, courses: &[SampleCourse]) -> Result<()> {
    let text = |f: fn(&SampleCourse) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(courses.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("course_id", DataType::Int64, false),
        Field::new("course_title", DataType::Utf8, false),
        Field::new("url", DataType::Utf8, false),
        Field::new("price", DataType::Utf8, false),
        Field::new("num_subscribers", DataType::Int64, true),
        Field::new("level", DataType::Utf8, false),
        Field::new("published_timestamp", DataType::Utf8, false),
        Field::new("subject", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(courses.iter().map(|c| c.id).collect::<Vec<_>>())),
            text(|c| c.title.as_str()),
            text(|c| c.url.as_str()),
            text(|c| c.price.as_str()),
            Arc::new(Int64Array::from(
                courses.iter().map(|c| c.subscribers).collect::<Vec<_>>(),
            )),
            text(|c| c.level.as_str()),
            text(|c| c.published.as_str()),
            text(|c| c.subject.as_str()),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let courses = generate(&mut rng);

    let csv_path = "sample_courses.csv";
    let parquet_path = "sample_courses.parquet";
    write_csv(csv_path, &courses)?;
    write_parquet(parquet_path, &courses)?;

    println!(
        "Wrote {} courses to {csv_path} and {parquet_path}",
        courses.len()
    );
    Ok(())
}
