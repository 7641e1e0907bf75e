// file: src/index/fixtures.rs
// description: small search indexes shared by unit tests
// reference: trimmed from a real documentation build

/// Older encoding: bare keys, scalar postings, keyed object groups.
pub const LEGACY_INDEX: &str = r#"Search.setIndex({docnames:["API","api/cirq_iqm","api/cirq_iqm.devices","api/cirq_iqm.devices.adonis","api/cirq_iqm.devices.adonis.Adonis","changelog","api/cirq_iqm.iqm_sampler.IQMSampler","user_guide"],envversion:{"sphinx.domains.python":3,sphinx:56},filenames:["API.rst","api/cirq_iqm.rst","api/cirq_iqm.devices.rst","api/cirq_iqm.devices.adonis.rst","api/cirq_iqm.devices.adonis.Adonis.rst","changelog.rst","api/cirq_iqm.iqm_sampler.IQMSampler.rst","user_guide.rst"],objects:{"":[[1,0,0,"-","cirq_iqm"]],cirq_iqm:[[2,0,0,"-","devices"]],"cirq_iqm.devices":[[3,0,0,"-","adonis"]],"cirq_iqm.devices.adonis":{Adonis:[4,1,1,""]},"cirq_iqm.iqm_sampler":[[6,1,1,"","IQMSampler"]],"cirq_iqm.iqm_sampler.IQMSampler":[[6,2,1,"","run_sweep"]]},objnames:{"0":["py","module","Python module"],"1":["py","class","Python class"],"2":["py","method","Python method"]},objtypes:{"0":"py:module","1":"py:class","2":"py:method"},terms:{adoni:[3,4],circuit:[6,7],cirq_iqm:[1,2,3,4,6],devic:[2,3,4,7],iqm:[1,2,3,4,6,7],iqmsampl:6,optim:7,quantum:[0,7],releas:5,rout:7,run:[6,7],run_sweep:6,sampler:6,version:5},titles:["API Reference","cirq_iqm","cirq_iqm.devices","cirq_iqm.devices.adonis","cirq_iqm.devices.adonis.Adonis","Changelog","cirq_iqm.iqm_sampler.IQMSampler","User guide"],titleterms:{adoni:[3,4],api:0,changelog:5,cirq_iqm:[1,2,3,4,6],devic:[2,3,4],guid:7,iqmsampl:6,refer:0,user:7}})"#;

/// Newer encoding of the same documentation: quoted keys, row object
/// groups, section titles and index entries.
pub const JSON_INDEX: &str = r#"Search.setIndex({"docnames": ["API", "api/cirq_iqm", "api/cirq_iqm.devices", "api/cirq_iqm.devices.adonis", "api/cirq_iqm.devices.adonis.Adonis", "changelog", "api/cirq_iqm.iqm_sampler.IQMSampler", "user_guide"], "filenames": ["API.rst", "api/cirq_iqm.rst", "api/cirq_iqm.devices.rst", "api/cirq_iqm.devices.adonis.rst", "api/cirq_iqm.devices.adonis.Adonis.rst", "changelog.rst", "api/cirq_iqm.iqm_sampler.IQMSampler.rst", "user_guide.rst"], "titles": ["API Reference", "cirq_iqm", "cirq_iqm.devices", "cirq_iqm.devices.adonis", "cirq_iqm.devices.adonis.Adonis", "Changelog", "cirq_iqm.iqm_sampler.IQMSampler", "User guide"], "terms": {"adoni": [3, 4], "circuit": [6, 7], "cirq_iqm": [1, 2, 3, 4, 6], "devic": [2, 3, 4, 7], "iqm": [1, 2, 3, 4, 6, 7], "iqmsampl": 6, "optim": 7, "quantum": [0, 7], "releas": 5, "rout": 7, "run": [6, 7], "run_sweep": 6, "sampler": 6, "version": 5}, "objects": {"": [[1, 0, 0, "-", "cirq_iqm"]], "cirq_iqm": [[2, 0, 0, "-", "devices"]], "cirq_iqm.devices": [[3, 0, 0, "-", "adonis"]], "cirq_iqm.devices.adonis": [[4, 1, 1, "", "Adonis"]], "cirq_iqm.iqm_sampler": [[6, 1, 1, "", "IQMSampler"]], "cirq_iqm.iqm_sampler.IQMSampler": [[6, 2, 1, "", "run_sweep"]]}, "objtypes": {"0": "py:module", "1": "py:class", "2": "py:method"}, "objnames": {"0": ["py", "module", "Python module"], "1": ["py", "class", "Python class"], "2": ["py", "method", "Python method"]}, "titleterms": {"adoni": [3, 4], "api": 0, "changelog": 5, "cirq_iqm": [1, 2, 3, 4, 6], "devic": [2, 3, 4], "guid": 7, "iqmsampl": 6, "refer": 0, "user": 7}, "envversion": {"sphinx": 58, "sphinx.domains.python": 4}, "alltitles": {"API Reference": [[0, "api-reference"]], "Changelog": [[5, null]], "Routing and optimization": [[7, "routing-and-optimization"]], "User guide": [[7, null]], "Version 1.0": [[5, "version-1-0"]], "cirq_iqm.devices.adonis.Adonis": [[4, "cirq-iqm-devices-adonis-adonis"]]}, "indexentries": {"Adonis (class in cirq_iqm.devices.adonis)": [[4, "cirq_iqm.devices.adonis.Adonis"]], "IQMSampler (class in cirq_iqm.iqm_sampler)": [[6, "cirq_iqm.iqm_sampler.IQMSampler"]], "cirq_iqm": [[1, "module-cirq_iqm"]], "module": [[1, "module-cirq_iqm"], [2, "module-cirq_iqm.devices"], [3, "module-cirq_iqm.devices.adonis"]], "run_sweep() (cirq_iqm.iqm_sampler.IQMSampler method)": [[6, "cirq_iqm.iqm_sampler.IQMSampler.run_sweep"]]}})"#;
