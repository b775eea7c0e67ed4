use structopt::StructOpt;
use tracing::info;

use vlm_eval::config::{EvalConfig, Opts};
use vlm_eval::resources::PyResources;
use vlm_eval::utils::init_tracing;
use vlm_eval::{caption_images, load_caption_dataset, score_captions, MediaLoader};

// cargo run --features python --bin eval_img_cap -- --cfg-path [CONFIG_PATH]
fn main() -> anyhow::Result<()> {
    init_tracing();
    let opt = Opts::from_args();
    let config = EvalConfig::from_path(&opt.cfg_path)?;

    let datasets = config.caption_datasets
        .iter()
        .map(load_caption_dataset)
        .collect::<vlm_eval::Result<Vec<_>>>()?;

    let resources = PyResources::new(config.setup_config(true))?;
    let loader = MediaLoader::from_config(&config.processors);

    let mut runs = Vec::with_capacity(datasets.len());
    for dataset in datasets.iter() {
        runs.push(caption_images(&resources, &loader, dataset)?);
    }
    for (dataset, run) in datasets.iter().zip(runs.iter()) {
        let cider = score_captions(&resources, run)?;
        info!(dataset = dataset.name(), cider = cider.score, "caption evaluation done");
        println!("{}", cider.score);
    }
    Ok(())
}
