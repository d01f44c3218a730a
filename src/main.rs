use dsql::backend::MemoryBackend;
use dsql::eval::{Evaluator, Options, Row, Scalar, Value};

// Sample program run against a seeded in-memory `user` table.
const PROGRAM: &str = "\
SELECT * FROM user;
INSERT INTO user VALUES ('yvonne', 13, 'fire');
SELECT * FROM user;
";

fn user(name: &str, age: i32, password: &str) -> Row {
    [
        ("name", Scalar::from(name)),
        ("age", Scalar::from(age)),
        ("password", Scalar::from(password)),
    ]
    .into_iter()
    .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::from_env();
    log::info!("claim policy: {}", options.claim_policy);

    let backend = MemoryBackend::new().with_table(
        "user",
        ["name", "age", "password"],
        vec![
            user("brian", 24, "secret1"),
            user("kithinji", 25, "secret2"),
            user("mutwiri", 26, "secret3"),
        ],
    );

    let ast = dsql::sql::parse(PROGRAM)?;
    let evaluator = Evaluator::new(backend).with_options(options);
    let results = evaluator.execute(&ast).await?;

    for (i, result) in results.iter().enumerate() {
        match result {
            Value::Rows(rows) => {
                println!("[{}] {} row(s)", i + 1, rows.len());
                for row in rows {
                    println!("    {row}");
                }
            }
            other => println!("[{}] {other}", i + 1),
        }
    }

    Ok(())
}
