use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::nn::losses::Loss;
use crate::nn::module::Module;
use crate::optim::Optimizer;
use crate::registry::Registry;
use log::{debug, info};
use rand::RngCore;
use std::fmt::Write;

const SUMMARY_WIDTH: usize = 100;

/// Options of [`Sequential::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitConfig {
    pub epochs: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        FitConfig { epochs: 1 }
    }
}

/// Loss recorded at the end of every training epoch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    pub loss: Vec<f64>,
}

/// A stack of layers applied one after the other.
///
/// The model is built lazily with the width of its first input, and must be
/// compiled with an optimizer and a loss before [`Sequential::fit`] or
/// [`Sequential::evaluate`]. Parameters live in the [`Graph`] passed to
/// `build`; the same graph must be used for every later call.
///
/// Every forward pass appends nodes on top of the parameters. `fit`,
/// `evaluate` and `predict` truncate the graph back to its length at the
/// start of the call once they are done, so memory stays bounded across
/// epochs. Node ids created during those calls do not survive them.
#[derive(Debug, Default)]
pub struct Sequential {
    layers: Vec<Box<dyn Module>>,
    input_width: Option<usize>,
    optimizer: Option<Box<dyn Optimizer>>,
    loss: Option<Loss>,
}

impl Sequential {
    pub fn new() -> Self {
        Sequential::default()
    }

    /// Appends a layer. Layers added after `build` are never built.
    pub fn add(&mut self, layer: impl Module + 'static) -> &mut Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn layers(&self) -> &[Box<dyn Module>] {
        &self.layers
    }

    pub fn is_built(&self) -> bool {
        self.input_width.is_some()
    }

    pub fn is_compiled(&self) -> bool {
        self.optimizer.is_some() && self.loss.is_some()
    }

    pub fn optimizer(&self) -> Option<&dyn Optimizer> {
        self.optimizer.as_deref()
    }

    pub fn loss(&self) -> Option<Loss> {
        self.loss
    }

    /// Creates every layer's parameters for inputs of width `input_width`.
    ///
    /// Each layer is built with the output width of the previous one; layers
    /// that do not change the width (dropout) pass it through. Building an
    /// already built model again with the same width does nothing; a
    /// different width fails with [`KaiTorchError::ShapeMismatch`].
    pub fn build(&mut self, input_width: usize, graph: &mut Graph, rng: &mut dyn RngCore) -> Result<(), KaiTorchError> {
        if let Some(expected) = self.input_width {
            if expected != input_width {
                return Err(KaiTorchError::ShapeMismatch {
                    expected,
                    actual: input_width,
                    operation: "Sequential::build".to_string(),
                });
            }
            return Ok(());
        }
        let mut width = input_width;
        for layer in self.layers.iter_mut() {
            layer.build(width, graph, rng)?;
            width = layer.output_width().unwrap_or(width);
        }
        self.input_width = Some(input_width);
        debug!(
            "Sequential: built {} layers for input width {}, {} parameters",
            self.layers.len(),
            input_width,
            self.parameters().len()
        );
        Ok(())
    }

    /// Sets the optimizer and the loss, replacing any previous ones.
    pub fn compile(&mut self, optimizer: Box<dyn Optimizer>, loss: Loss) {
        self.optimizer = Some(optimizer);
        self.loss = Some(loss);
    }

    /// Like [`Sequential::compile`], resolving both by registered name.
    pub fn compile_named(
        &mut self,
        optimizer: &str,
        loss: &str,
        optimizers: &Registry<Box<dyn Optimizer>>,
        losses: &Registry<Loss>,
    ) -> Result<(), KaiTorchError> {
        let optimizer = optimizers.resolve(optimizer)?;
        let loss = losses.resolve(loss)?;
        self.compile(optimizer, loss);
        Ok(())
    }

    /// Runs one sample through every layer.
    pub fn forward(
        &self,
        graph: &mut Graph,
        inputs: &[NodeId],
        train: bool,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<NodeId>, KaiTorchError> {
        if !self.is_built() {
            return Err(KaiTorchError::ModelNotBuilt);
        }
        let mut current = inputs.to_vec();
        for layer in &self.layers {
            current = layer.forward(graph, &current, train, rng)?;
        }
        Ok(current)
    }

    /// Every parameter leaf, layer by layer.
    pub fn parameters(&self) -> Vec<NodeId> {
        self.layers.iter().flat_map(|layer| layer.parameters()).collect()
    }

    pub fn zero_grad(&self, graph: &mut Graph) -> Result<(), KaiTorchError> {
        for layer in &self.layers {
            layer.zero_grad(graph)?;
        }
        Ok(())
    }

    /// Applies one optimizer update to every parameter.
    pub fn step(&mut self, graph: &mut Graph) -> Result<(), KaiTorchError> {
        let params = self.parameters();
        let optimizer = self.optimizer.as_mut().ok_or(KaiTorchError::ModelNotCompiled)?;
        optimizer.step(graph, &params)
    }

    /// Trains for `config.epochs` full-batch epochs.
    ///
    /// Each epoch runs every sample through the model in training mode,
    /// computes the loss over all of them, zeroes the parameter gradients,
    /// backpropagates and takes one optimizer step. The model is built from
    /// the width of `x[0]` if needed.
    pub fn fit(
        &mut self,
        graph: &mut Graph,
        x: &[Vec<f64>],
        y: &[Vec<f64>],
        config: &FitConfig,
        rng: &mut dyn RngCore,
    ) -> Result<History, KaiTorchError> {
        self.prepare(graph, x, Some(y), rng)?;
        if !self.is_compiled() {
            return Err(KaiTorchError::ModelNotCompiled);
        }

        let mut history = History::default();
        for epoch in 1..=config.epochs {
            let mark = graph.len();
            let result = self.train_epoch(graph, x, y, rng);
            graph.truncate(mark);
            let loss = result?;
            info!("Epoch {:>3}/{} - loss: {:.4}", epoch, config.epochs, loss);
            history.loss.push(loss);
        }
        Ok(history)
    }

    fn train_epoch(
        &mut self,
        graph: &mut Graph,
        x: &[Vec<f64>],
        y: &[Vec<f64>],
        rng: &mut dyn RngCore,
    ) -> Result<f64, KaiTorchError> {
        let loss = self.run_loss(graph, x, y, true, rng)?;
        let value = graph.value(loss)?;
        self.zero_grad(graph)?;
        graph.backward(loss)?;
        self.step(graph)?;
        Ok(value)
    }

    /// Loss of the model on `(x, y)` in inference mode.
    pub fn evaluate(
        &mut self,
        graph: &mut Graph,
        x: &[Vec<f64>],
        y: &[Vec<f64>],
        rng: &mut dyn RngCore,
    ) -> Result<f64, KaiTorchError> {
        self.prepare(graph, x, Some(y), rng)?;
        let mark = graph.len();
        let result = self
            .run_loss(graph, x, y, false, rng)
            .and_then(|loss| graph.value(loss));
        graph.truncate(mark);
        let loss = result?;
        info!("Evaluation - loss: {:.4}", loss);
        Ok(loss)
    }

    /// Output values for every sample, in inference mode.
    pub fn predict(
        &mut self,
        graph: &mut Graph,
        x: &[Vec<f64>],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Vec<f64>>, KaiTorchError> {
        self.prepare(graph, x, None, rng)?;
        let mark = graph.len();
        let result = self.run(graph, x, false, rng).and_then(|outputs| {
            outputs
                .iter()
                .map(|row| row.iter().map(|&id| graph.value(id)).collect::<Result<Vec<f64>, _>>())
                .collect()
        });
        graph.truncate(mark);
        result
    }

    /// Checks the data layout and builds the model from the first sample.
    fn prepare(
        &mut self,
        graph: &mut Graph,
        x: &[Vec<f64>],
        y: Option<&[Vec<f64>]>,
        rng: &mut dyn RngCore,
    ) -> Result<(), KaiTorchError> {
        let first = x.first().ok_or_else(|| KaiTorchError::EmptyInput("Sequential".to_string()))?;
        if let Some(y) = y {
            if y.len() != x.len() {
                return Err(KaiTorchError::ShapeMismatch {
                    expected: x.len(),
                    actual: y.len(),
                    operation: "Sequential targets".to_string(),
                });
            }
        }
        self.build(first.len(), graph, rng)
    }

    fn run(
        &self,
        graph: &mut Graph,
        x: &[Vec<f64>],
        train: bool,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Vec<NodeId>>, KaiTorchError> {
        let mut outputs = Vec::with_capacity(x.len());
        for sample in x {
            let inputs: Vec<NodeId> = sample.iter().map(|&v| graph.leaf(v)).collect();
            outputs.push(self.forward(graph, &inputs, train, rng)?);
        }
        Ok(outputs)
    }

    fn run_loss(
        &self,
        graph: &mut Graph,
        x: &[Vec<f64>],
        y: &[Vec<f64>],
        train: bool,
        rng: &mut dyn RngCore,
    ) -> Result<NodeId, KaiTorchError> {
        let loss = self.loss.ok_or(KaiTorchError::ModelNotCompiled)?;
        let predictions = self.run(graph, x, train, rng)?;
        loss.compute(graph, y, &predictions)
    }

    /// Layer table with output widths and parameter counts.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let rule = "_".repeat(SUMMARY_WIDTH);
        let double_rule = "=".repeat(SUMMARY_WIDTH);

        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(
            out,
            "{:<56}{:<16}{:<10}{:<10}{:<8}",
            "Layer", "Output Shape", "Params", "Weights", "Biases"
        );
        let _ = writeln!(out, "{}", double_rule);

        let mut total = 0;
        for (index, layer) in self.layers.iter().enumerate() {
            let params = layer.parameters().len();
            let output = match layer.output_width() {
                Some(width) => format!("(None, {})", width),
                None => "?".to_string(),
            };
            let biases = if params > 0 { layer.output_width().unwrap_or(0) } else { 0 };
            let weights = params.saturating_sub(biases);
            total += params;

            let _ = writeln!(
                out,
                "{:<56}{:<16}{:<10}{:<10}{:<8}",
                layer.describe(),
                output,
                params,
                weights,
                biases
            );
            if index + 1 != self.layers.len() {
                let _ = writeln!(out, "{}", rule);
            }
        }
        let _ = writeln!(out, "{}", double_rule);
        let _ = writeln!(out, "Total Params: {}", total);
        let _ = write!(out, "{}", rule);
        out
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
