use regiondash::error::AppResult;

fn main() -> AppResult<()> {
    regiondash::entry::run()
}
