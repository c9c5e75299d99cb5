use crate::chain::McmcChain;
use anyhow::anyhow;
use ndarray::{ArrayD, Dimension, IxDyn, ShapeBuilder};
use std::collections::HashMap;

/// Draws of one chain keyed by flattened element names, e.g., `sigma`,
/// `alpha[3]` or `beta[0,2]` (zero-based indices)
#[derive(Debug, Default, Clone)]
pub struct NamedDraws {
    names: Vec<Box<str>>,
    index: HashMap<Box<str>, usize>,
    columns: Vec<Vec<f32>>,
}

/// Flattened name of the element `idx` of parameter `name`
pub fn element_name(name: &str, idx: &[usize]) -> Box<str> {
    if idx.is_empty() {
        return name.into();
    }
    let idx: Vec<String> = idx.iter().map(|i| i.to_string()).collect();
    format!("{}[{}]", name, idx.join(",")).into_boxed_str()
}

impl NamedDraws {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a header of element names and one draw per row
    pub fn from_rows(names: &[Box<str>], rows: &[Vec<f32>]) -> anyhow::Result<Self> {
        let mut ret = Self::new();
        for (j, name) in names.iter().enumerate() {
            let column = rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    row.get(j)
                        .copied()
                        .ok_or_else(|| anyhow!("draw {} has no value for {}", i, name))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            ret.push_column(name, column)?;
        }
        Ok(ret)
    }

    /// Add the draws of one element; every element needs the same number
    /// of draws
    pub fn push_column(&mut self, name: &str, draws: Vec<f32>) -> anyhow::Result<()> {
        if let Some(first) = self.columns.first() {
            if first.len() != draws.len() {
                return Err(anyhow!(
                    "{} has {} draws, expected {}",
                    name,
                    draws.len(),
                    first.len()
                ));
            }
        }
        if self.index.contains_key(name) {
            return Err(anyhow!("duplicate element {}", name));
        }
        self.index.insert(name.into(), self.columns.len());
        self.names.push(name.into());
        self.columns.push(draws);
        Ok(())
    }

    pub fn names(&self) -> &[Box<str>] {
        &self.names
    }

    pub fn n_draws(&self) -> usize {
        self.columns.first().map(|x| x.len()).unwrap_or(0)
    }

    /// Draws of a single element
    pub fn column(&self, name: &str) -> Option<&[f32]> {
        self.index.get(name).map(|&j| self.columns[j].as_slice())
    }

    /// Draws restricted to `names`, as a chain of flat vectors
    pub fn to_chain(&self, names: &[Box<str>]) -> anyhow::Result<McmcChain<Vec<f32>>> {
        let columns = names
            .iter()
            .map(|name| {
                self.column(name)
                    .ok_or_else(|| anyhow!("no draws for {}", name))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let samples = (0..self.n_draws())
            .map(|i| columns.iter().map(|col| col[i]).collect())
            .collect::<Vec<Vec<f32>>>();
        let log_likelihoods = vec![f32::NAN; samples.len()];
        Ok(McmcChain {
            samples,
            log_likelihoods,
        })
    }

    /// Rebuild each parameter from the final draw, e.g., to initialize
    /// the sampler of the next iteration.
    ///
    /// * `defs` - parameter names with their shapes; an empty shape is a
    ///   scalar
    ///
    /// Each array is laid out in column-major order.
    pub fn last_sample(
        &self,
        defs: &[(&str, &[usize])],
    ) -> anyhow::Result<HashMap<Box<str>, ArrayD<f32>>> {
        let last = self
            .n_draws()
            .checked_sub(1)
            .ok_or_else(|| anyhow!("no draws"))?;

        let mut ret = HashMap::with_capacity(defs.len());

        for &(name, shape) in defs {
            let mut arr = ArrayD::<f32>::zeros(IxDyn(shape).f());
            for (idx, x) in arr.indexed_iter_mut() {
                let elem = element_name(name, idx.slice());
                let col = self
                    .column(&elem)
                    .ok_or_else(|| anyhow!("missing element {}", elem))?;
                *x = col[last];
            }
            ret.insert(name.into(), arr);
        }
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_names() {
        assert_eq!(&*element_name("sigma", &[]), "sigma");
        assert_eq!(&*element_name("alpha", &[3]), "alpha[3]");
        assert_eq!(&*element_name("beta", &[0, 2]), "beta[0,2]");
    }

    #[test]
    fn rebuild_last_draw() -> anyhow::Result<()> {
        let mut draws = NamedDraws::new();
        draws.push_column("sigma", vec![0.1, 0.2])?;
        for i in 0..2 {
            for j in 0..3 {
                let v = (10 * i + j) as f32;
                draws.push_column(&element_name("beta", &[i, j]), vec![-1.0, v])?;
            }
        }

        let last = draws.last_sample(&[("sigma", &[]), ("beta", &[2, 3])])?;

        assert_eq!(last["sigma"].ndim(), 0);
        assert_eq!(last["sigma"][IxDyn(&[])], 0.2);

        let beta = &last["beta"];
        assert_eq!(beta.shape(), &[2, 3]);
        assert_eq!(beta[IxDyn(&[1, 2])], 12.0);
        assert_eq!(beta[IxDyn(&[0, 1])], 1.0);
        assert!(beta.t().is_standard_layout());
        Ok(())
    }

    #[test]
    fn missing_element_is_an_error() -> anyhow::Result<()> {
        let mut draws = NamedDraws::new();
        draws.push_column("alpha[0]", vec![1.0])?;
        assert!(draws.last_sample(&[("alpha", &[2])]).is_err());
        assert!(draws.push_column("alpha[1]", vec![1.0, 2.0]).is_err());
        assert!(draws.push_column("alpha[0]", vec![1.0]).is_err());
        assert!(NamedDraws::new().last_sample(&[]).is_err());
        Ok(())
    }

    #[test]
    fn chain_of_selected_elements() -> anyhow::Result<()> {
        let names: Vec<Box<str>> = vec!["a".into(), "b".into(), "c".into()];
        let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let draws = NamedDraws::from_rows(&names, &rows)?;

        let chain = draws.to_chain(&["c".into(), "a".into()])?;
        assert_eq!(chain.samples, vec![vec![3.0, 1.0], vec![6.0, 4.0]]);
        assert_eq!(chain.last_sample(), Some(&vec![6.0, 4.0]));
        assert!(draws.to_chain(&["d".into()]).is_err());
        Ok(())
    }
}
