use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load once, in order. The first error aborts the run.
    pub async fn run(&self) -> Result<String> {
        // Extract
        println!("Downloading IPCA data...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Downloaded API payload");

        // Transform
        println!("Converting data to table...");
        let table = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Reshaped {} rows x {} columns",
            table.num_rows(),
            table.num_columns()
        );

        // Load
        println!("Saving data to file {}...", self.pipeline.output_path());
        let output_path = self.pipeline.load(table).await?;
        tracing::info!("Output saved to: {}", output_path);

        println!("Process completed successfully!");
        Ok(output_path)
    }
}
