use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use rand::RngCore;
use std::fmt::Debug;

/// The base trait for every layer that can be stacked in a `Sequential` model.
///
/// Layers are built lazily: the input width is only known once the model sees
/// its first sample, at which point [`Module::build`] creates the layer's
/// parameter leaves in the graph. Forward passes then append nodes on top of
/// those leaves.
pub trait Module: Debug {
    /// Creates the parameters for an input of width `nin`.
    ///
    /// Calling `build` on a layer that is already built does nothing.
    fn build(&mut self, nin: usize, graph: &mut Graph, rng: &mut dyn RngCore) -> Result<(), KaiTorchError>;

    fn is_built(&self) -> bool;

    /// Runs the layer on one sample.
    ///
    /// `train` switches on training-only behaviour such as dropout; `rng` is
    /// only consumed by layers that need randomness.
    ///
    /// # Errors
    /// [`KaiTorchError::ModelNotBuilt`] before `build`, and
    /// [`KaiTorchError::ShapeMismatch`] when `inputs` has the wrong width.
    fn forward(
        &self,
        graph: &mut Graph,
        inputs: &[NodeId],
        train: bool,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<NodeId>, KaiTorchError>;

    /// Learnable parameter leaves, in a stable order.
    fn parameters(&self) -> Vec<NodeId>;

    /// Width of the output, if known yet.
    fn output_width(&self) -> Option<usize>;

    /// One-line description used by model summaries.
    fn describe(&self) -> String;

    /// Resets the gradient of every parameter to 0.0.
    fn zero_grad(&self, graph: &mut Graph) -> Result<(), KaiTorchError> {
        graph.zero_grad(&self.parameters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Scales every input by a single learnable gain.
    #[derive(Debug, Default)]
    struct Gain {
        gain: Option<NodeId>,
        width: Option<usize>,
    }

    impl Module for Gain {
        fn build(&mut self, nin: usize, graph: &mut Graph, _rng: &mut dyn RngCore) -> Result<(), KaiTorchError> {
            if self.gain.is_none() {
                self.gain = Some(graph.leaf(2.0));
                self.width = Some(nin);
            }
            Ok(())
        }

        fn is_built(&self) -> bool {
            self.gain.is_some()
        }

        fn forward(
            &self,
            graph: &mut Graph,
            inputs: &[NodeId],
            _train: bool,
            _rng: &mut dyn RngCore,
        ) -> Result<Vec<NodeId>, KaiTorchError> {
            let gain = self.gain.ok_or(KaiTorchError::ModelNotBuilt)?;
            inputs.iter().map(|&x| graph.mul(gain, x)).collect()
        }

        fn parameters(&self) -> Vec<NodeId> {
            self.gain.into_iter().collect()
        }

        fn output_width(&self) -> Option<usize> {
            self.width
        }

        fn describe(&self) -> String {
            "Gain()".to_string()
        }
    }

    #[test]
    fn test_default_zero_grad_resets_parameters() -> Result<(), KaiTorchError> {
        let mut graph = Graph::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut layer = Gain::default();
        layer.build(2, &mut graph, &mut rng)?;

        let x = [graph.leaf(1.0), graph.leaf(3.0)];
        let out = layer.forward(&mut graph, &x, true, &mut rng)?;
        let total = graph.add(out[0], out[1])?;
        graph.backward(total)?;

        let gain = layer.parameters()[0];
        assert_eq!(graph.grad(gain)?, 4.0);
        layer.zero_grad(&mut graph)?;
        assert_eq!(graph.grad(gain)?, 0.0);
        // inputs are not parameters and keep their gradient
        assert_eq!(graph.grad(x[0])?, 2.0);
        Ok(())
    }

    #[test]
    fn test_forward_before_build_fails() {
        let mut graph = Graph::new();
        let mut rng = StdRng::seed_from_u64(0);
        let layer = Gain::default();
        assert_eq!(
            layer.forward(&mut graph, &[], false, &mut rng),
            Err(KaiTorchError::ModelNotBuilt)
        );
    }
}
