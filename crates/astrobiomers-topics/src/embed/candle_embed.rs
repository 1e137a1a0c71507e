//! BiomedBERT embedder via Candle. Gated behind the `candle` feature since
//! it downloads model weights from the Hugging Face Hub on first use.

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, HiddenAct, PositionEmbeddingType};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use super::{l2_normalize, SentenceEmbedder};

pub struct CandleBertEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    hidden_size: usize,
}

impl CandleBertEmbedder {
    pub fn load(model_id: &str) -> anyhow::Result<Self> {
        let device = Device::Cpu;
        let api = Api::new()?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo.get("config.json")?;
        let config: Config = serde_json::from_str(&std::fs::read_to_string(config_path)?)?;

        let tokenizer_path = repo.get("tokenizer.json")?;
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(anyhow::Error::msg)?;

        let weights_path = repo
            .get("model.safetensors")
            .or_else(|_| repo.get("pytorch_model.bin"))?;
        let vb = if weights_path.extension().map(|e| e == "safetensors").unwrap_or(false) {
            unsafe { VarBuilder::from_mmaped_safetensors(&[&weights_path], DType::F32, &device)? }
        } else {
            VarBuilder::from_pth(&weights_path, DType::F32, &device)?
        };

        let hidden_size = config.hidden_size;
        let model = BertModel::load(vb, &config)?;

        Ok(Self { model, tokenizer, device, hidden_size })
    }

    fn embed_one(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let encoding = self.tokenizer.encode(text, true).map_err(anyhow::Error::msg)?;
        let ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let mask = Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = ids.zeros_like()?;

        let output = self.model.forward(&ids, &token_type_ids, Some(&mask))?;
        let mask_f = mask.to_dtype(DType::F32)?;
        let mask_expanded = mask_f.unsqueeze(2)?.broadcast_as(output.shape())?;
        let summed = (&output * &mask_expanded)?.sum(1)?;
        let counts = mask_f.sum(1)?.unsqueeze(1)?.clamp(1e-9f32, f32::MAX)?;
        let pooled = summed.broadcast_div(&counts)?;

        let mut vector = pooled.squeeze(0)?.to_vec1::<f32>()?;
        l2_normalize(&mut vector);
        Ok(vector)
    }
}

impl SentenceEmbedder for CandleBertEmbedder {
    fn dim(&self) -> usize {
        self.hidden_size
    }

    fn embed(&self, texts: &[String]) -> Vec<Vec<f32>> {
        texts
            .iter()
            .map(|t| self.embed_one(t).unwrap_or_else(|e| {
                log::warn!("candle embedding failed, falling back to zero vector: {e}");
                vec![0.0; self.hidden_size]
            }))
            .collect()
    }
}
