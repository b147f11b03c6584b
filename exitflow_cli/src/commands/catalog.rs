use anyhow::Result;
use exitflow_core::workflow::catalog;

pub fn run() -> Result<()> {
    for department in catalog() {
        println!("{} ({})", department.department_name, department.department_id);
        for item in &department.items {
            println!("  - {} [{:?}]", item.item_name, item.item_type);
        }
    }

    Ok(())
}
