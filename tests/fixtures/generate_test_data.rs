// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成合成的零售网络数据集 (确定性,无随机数)
// 输出: tests/fixtures/datasets/<name>/*.csv + profile.json
// ==========================================
// 数据集:
//   01_normal           10x10 网格需求区, 3 品牌, 12 门店
//   02_missing_class    需求区引用不存在的分类代码
//   03_invalid_numeric  门店面积非数值
//   04_zero_floorspace  全部门店面积为 0
// ==========================================

use csv::Writer;
use std::error::Error;
use std::fs;
use std::path::Path;

const ROOT: &str = "tests/fixtures/datasets";

const BRANDS: &[(&str, f64, f64)] = &[
    ("Tesco", 1.10, 0.45),
    ("Asda", 1.00, 0.35),
    ("Aldi", 0.90, 0.20),
];

const CLASSES: &[(&str, &str, f64)] = &[
    ("1", "Rural Residents", 0.15),
    ("2", "Cosmopolitans", 0.60),
    ("3", "Suburbanites", 0.35),
];

// 网格原点 (Leeds 附近的 BNG 坐标)
const ORIGIN_E: f64 = 425000.0;
const ORIGIN_N: f64 = 430000.0;
const CELL_M: f64 = 500.0;

#[derive(Default)]
struct Options {
    unknown_class_row: Option<usize>,
    invalid_footage_row: Option<usize>,
    zero_floorspace: bool,
}

fn write_brands(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(dir.join("brands.csv"))?;
    wtr.write_record(["name", "alpha", "obs_shares"])?;
    for (name, alpha, share) in BRANDS {
        wtr.write_record([name.to_string(), alpha.to_string(), share.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_classes(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(dir.join("oac.csv"))?;
    wtr.write_record(["class_no", "name", "beta"])?;
    for (code, name, beta) in CLASSES {
        wtr.write_record([code.to_string(), name.to_string(), beta.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_zones(dir: &Path, opts: &Options) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(dir.join("demand.csv"))?;
    wtr.write_record(["OA11CD", "expenditure", "oac", "c_easting", "c_northing"])?;
    for i in 0..100 {
        let (col, row) = (i % 10, i / 10);
        let class = if opts.unknown_class_row == Some(i) {
            "9".to_string()
        } else {
            CLASSES[(col + row) % CLASSES.len()].0.to_string()
        };
        let spend = 8000.0 + ((i * 37) % 50) as f64 * 120.0;
        wtr.write_record([
            format!("E0005{:04}", i),
            format!("{:.2}", spend),
            class,
            format!("{:.1}", ORIGIN_E + col as f64 * CELL_M + CELL_M / 2.0),
            format!("{:.1}", ORIGIN_N + row as f64 * CELL_M + CELL_M / 2.0),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_stores(dir: &Path, opts: &Options) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(dir.join("stores.csv"))?;
    wtr.write_record(["name", "brand", "easting", "northing", "footage"])?;
    for i in 0..12 {
        let brand = BRANDS[i % BRANDS.len()].0;
        let footage = if opts.zero_floorspace {
            "0".to_string()
        } else if opts.invalid_footage_row == Some(i) {
            "large".to_string()
        } else {
            format!("{}", 6000 + (i * 2750) % 30000)
        };
        wtr.write_record([
            format!("{}_{:02}", brand, i + 1),
            brand.to_string(),
            format!("{:.1}", ORIGIN_E + 400.0 + ((i * 1300) % 4600) as f64),
            format!("{:.1}", ORIGIN_N + 300.0 + ((i * 1700) % 4700) as f64),
            footage,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_profile(dir: &Path) -> Result<(), Box<dyn Error>> {
    let profile = serde_json::json!({
        "inputs": {
            "brands": "brands.csv",
            "classifications": "oac.csv",
            "zones": "demand.csv",
            "stores": "stores.csv"
        },
        "model": { "decay": "EXPONENTIAL", "distance_unit_m": 1000.0 },
        "output_dir": "out"
    });
    fs::write(dir.join("profile.json"), serde_json::to_string_pretty(&profile)?)?;
    Ok(())
}

fn generate(name: &str, opts: Options) -> Result<(), Box<dyn Error>> {
    let dir = Path::new(ROOT).join(name);
    fs::create_dir_all(&dir)?;
    write_brands(&dir)?;
    write_classes(&dir)?;
    write_zones(&dir, &opts)?;
    write_stores(&dir, &opts)?;
    write_profile(&dir)?;
    println!("✓ 生成 {}", dir.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成测试数据集...");

    generate("01_normal", Options::default())?;
    generate(
        "02_missing_class",
        Options {
            unknown_class_row: Some(42),
            ..Options::default()
        },
    )?;
    generate(
        "03_invalid_numeric",
        Options {
            invalid_footage_row: Some(5),
            ..Options::default()
        },
    )?;
    generate(
        "04_zero_floorspace",
        Options {
            zero_floorspace: true,
            ..Options::default()
        },
    )?;

    println!("✓ 所有测试数据集生成完成！");
    Ok(())
}
