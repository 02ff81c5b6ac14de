use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub reconcile: ReconcileConfig,
    pub invoice_columns: InvoiceColumns,
    pub erp_columns: ErpColumns,
    pub erp_source: ErpSourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// ERP 重复条码处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// 发票命中重复条码时报错
    #[default]
    Reject,
    /// 取文件中第一条
    FirstMatch,
    /// 每条都生成一行 (行数会膨胀)
    FanOut,
}

/// 对账参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// 错误信息中最多展示的样例数
    pub sample_limit: usize,
    /// 百分比差异保留的小数位
    pub percent_scale: i64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            sample_limit: 5,
            percent_scale: 4,
        }
    }
}

/// 发票列名映射 (逻辑字段 -> 表头)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceColumns {
    pub barcode: String,
    pub product_name: String,
    pub quantity: String,
    pub unit_price: String,
}

impl Default for InvoiceColumns {
    fn default() -> Self {
        Self {
            barcode: "Codigo de barras".to_string(),
            product_name: "Nombre producto".to_string(),
            quantity: "Cantidad".to_string(),
            unit_price: "Precio unitario".to_string(),
        }
    }
}

impl InvoiceColumns {
    /// 按固定顺序返回全部必需表头
    pub fn required(&self) -> [&str; 4] {
        [
            self.barcode.as_str(),
            self.product_name.as_str(),
            self.quantity.as_str(),
            self.unit_price.as_str(),
        ]
    }
}

/// ERP 列名映射
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ErpColumns {
    pub ean: String,
    pub sku: String,
    pub product_name: String,
    pub unit_value: String,
}

impl Default for ErpColumns {
    fn default() -> Self {
        Self {
            ean: "Codean".to_string(),
            sku: "Codpro".to_string(),
            product_name: "Nompro".to_string(),
            unit_value: "Valuni".to_string(),
        }
    }
}

impl ErpColumns {
    pub fn required(&self) -> [&str; 4] {
        [
            self.ean.as_str(),
            self.sku.as_str(),
            self.product_name.as_str(),
            self.unit_value.as_str(),
        ]
    }
}

/// ERP 导出文件格式
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ErpSourceConfig {
    pub delimiter: char,
    /// 非 UTF-8 时使用的编码 (WHATWG 标签)
    pub encoding: String,
}

impl Default for ErpSourceConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            encoding: "latin1".to_string(),
        }
    }
}

impl AppConfig {
    /// 从 recon.toml (可选) 与 RECON__* 环境变量加载配置
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("recon")
    }

    pub fn load_from(file_stem: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file_stem).required(false))
            .add_source(
                config::Environment::with_prefix("RECON")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
